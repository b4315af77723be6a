//! Input/output operations, configuration, and error handling

/// Command line interface and batch file processing
pub mod cli;
/// Algorithm constants and runtime defaults
pub mod configuration;
/// Error types and result alias
pub mod error;
/// PNG export of solved layouts
pub mod image;
/// JSON puzzle and solution documents
pub mod input;
/// Progress reporting for batch runs
pub mod progress;
/// Animated capture of assembly progress
pub mod visualization;
