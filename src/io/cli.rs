//! Command-line interface for batch solving of JSON puzzle documents

use crate::algorithm::assembler::{
    AssemblyConfig, CandidateScope, ConflictPolicy, GridAssembler,
};
use crate::analysis::corners::{CornerConfig, CornerDetector};
use crate::io::configuration::{
    DEFAULT_SEED, GIF_FRAME_DELAY_MS, OUTPUT_SUFFIX, PEAK_DISTANCE, SHARPNESS_OFFSET,
};
use crate::io::error::{ErrorContext, Result, ResultExt, SolverError, file_system, invalid_input};
use crate::io::image::export_layout_png;
use crate::io::input::{PuzzleDocument, SolutionDocument};
use crate::io::progress::ProgressManager;
use crate::io::visualization::PlacementCapture;
use crate::puzzle::synthetic::SyntheticPuzzle;
use clap::Parser;
use log::info;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Board dimensions given as `ROWSxCOLS`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSize {
    /// Number of rows
    pub rows: usize,
    /// Number of columns
    pub cols: usize,
}

impl FromStr for BoardSize {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (rows, cols) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected ROWSxCOLS, got '{s}'"))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|err| format!("invalid dimension '{part}': {err}"))
        };
        Ok(Self {
            rows: parse(rows)?,
            cols: parse(cols)?,
        })
    }
}

#[derive(Parser)]
#[command(name = "jigsolve")]
#[command(
    author,
    version,
    about = "Find piece corners and assemble jigsaw puzzles by greedy edge matching"
)]
/// Command-line arguments for the puzzle solver
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Puzzle document (.json) or directory of documents to solve
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if a solution exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Also write the solved layout as a PNG image
    #[arg(short, long)]
    pub render: bool,

    /// Also write the assembly order as an animated GIF
    #[arg(short, long)]
    pub visualize: bool,

    /// Treat matches above this distance as no match
    #[arg(short, long)]
    pub max_distance: Option<f64>,

    /// Minimum index separation between radial peaks
    #[arg(long, default_value_t = PEAK_DISTANCE)]
    pub peak_distance: usize,

    /// Contour offset used to measure peak sharpness
    #[arg(long, default_value_t = SHARPNESS_OFFSET)]
    pub sharpness_offset: usize,

    /// Log and skip conflicting matches instead of failing
    #[arg(long)]
    pub skip_conflicts: bool,

    /// Let the oracle pair placed pieces too, joining consistent neighbours
    #[arg(short, long)]
    pub join: bool,

    /// Write a synthetic ROWSxCOLS puzzle to TARGET instead of solving
    #[arg(long, value_name = "ROWSxCOLS")]
    pub synthesize: Option<BoardSize>,

    /// Random seed for synthetic puzzles
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,
}

impl Cli {
    /// Check if existing solutions should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Corner detector parameters from the command line
    pub fn corner_config(&self) -> CornerConfig {
        CornerConfig {
            peak_distance: self.peak_distance,
            sharpness_offset: self.sharpness_offset,
            ..CornerConfig::default()
        }
    }

    /// Assembler parameters from the command line
    pub const fn assembly_config(&self) -> AssemblyConfig {
        AssemblyConfig {
            max_match_distance: self.max_distance,
            conflict_policy: if self.skip_conflicts {
                ConflictPolicy::Skip
            } else {
                ConflictPolicy::Reject
            },
            candidate_scope: if self.join {
                CandidateScope::All
            } else {
                CandidateScope::Unplaced
            },
        }
    }
}

/// Orchestrates batch solving of puzzle documents with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, parameter validation, or any
    /// puzzle fails
    pub fn process(&mut self) -> Result<()> {
        if let Some(size) = self.cli.synthesize {
            return self.synthesize(size);
        }

        let files = self.collect_files()?;
        if files.is_empty() {
            return Ok(());
        }
        let detector = CornerDetector::new(self.cli.corner_config())?;
        let assembler = GridAssembler::new(self.cli.assembly_config())?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index, &detector, &assembler)
                .with_context(ErrorContext {
                    path: Some(file.clone()),
                })?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn synthesize(&self, size: BoardSize) -> Result<()> {
        let puzzle = SyntheticPuzzle::generate(size.rows, size.cols, self.cli.seed)?;
        PuzzleDocument::from_synthetic(&puzzle).save(&self.cli.target)?;
        info!(
            "wrote {}x{} synthetic puzzle to {}",
            size.rows,
            size.cols,
            self.cli.target.display()
        );
        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if !is_puzzle_document(target) {
                return Err(invalid_input(&"target file must be a .json puzzle document"));
            }
            Ok(if self.should_process_file(target) {
                vec![target.clone()]
            } else {
                vec![]
            })
        } else if target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target).map_err(file_system(target, "read directory"))? {
                let path = entry
                    .map_err(SolverError::from)
                    .with_context(ErrorContext {
                        path: Some(target.clone()),
                    })?
                    .path();
                if is_puzzle_document(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_input(
                &"target must be a .json puzzle document or a directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path, "json");
        if output_path.exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (solution exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    fn process_file(
        &mut self,
        input_path: &Path,
        index: usize,
        detector: &CornerDetector,
        assembler: &GridAssembler,
    ) -> Result<()> {
        let document = PuzzleDocument::load(input_path)?;
        let pieces = document.build_pieces(detector)?;
        let oracle = document.table()?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path, pieces.len());
        }

        let progress = self.progress_manager.as_mut().map(|pm| pm.observer(index));
        let capture = self.cli.visualize.then(PlacementCapture::new);
        let mut observer = (progress, capture);
        let assembly = assembler.run(&pieces, &oracle, &mut observer)?;
        let (_, capture) = observer;

        SolutionDocument::new(&assembly, &pieces)
            .save(&Self::get_output_path(input_path, "json"))?;

        if self.cli.render {
            export_layout_png(&assembly.grid, &Self::get_output_path(input_path, "png"))?;
        }

        if let Some(capture) = capture {
            capture.export_gif(
                &Self::get_visualization_path(input_path),
                GIF_FRAME_DELAY_MS,
            )?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, assembly.grid.len());
        }

        Ok(())
    }

    fn get_output_path(input_path: &Path, extension: &str) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = format!("{}{OUTPUT_SUFFIX}.{extension}", stem.to_string_lossy());

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }

    fn get_visualization_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let viz_name = format!("{}_visualization.gif", stem.to_string_lossy());

        if let Some(parent) = input_path.parent() {
            parent.join(viz_name)
        } else {
            PathBuf::from(viz_name)
        }
    }
}

/// A `.json` file that is not itself a solution
fn is_puzzle_document(path: &Path) -> bool {
    let is_json = path.extension().and_then(|s| s.to_str()) == Some("json");
    let is_solution = path
        .file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX));
    is_json && !is_solution
}
