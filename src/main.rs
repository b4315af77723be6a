//! CLI entry point for the jigsaw puzzle solver

use clap::Parser;
use jigsolve::io::cli::{Cli, FileProcessor};

fn main() -> jigsolve::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
