//! Error types and context management for corner detection and assembly

use std::fmt;
use std::path::PathBuf;

use crate::puzzle::piece::PieceId;
use crate::spatial::grid::GridPos;

/// Reason the corner detector could not produce four corners for a contour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFailure {
    /// Contour has too few points to define a centroid and a radial profile
    ContourTooShort {
        /// Number of contour points provided
        len: usize,
    },
    /// Fewer than two radial maxima were found along the contour
    TooFewPeaks {
        /// Number of peaks that survived separation filtering
        found: usize,
    },
    /// Fewer than four peaks had a positive sharpness score
    TooFewCandidates {
        /// Number of positive-sharpness peaks
        found: usize,
    },
}

impl fmt::Display for GeometryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContourTooShort { len } => write!(f, "contour has only {len} points"),
            Self::TooFewPeaks { found } => {
                write!(f, "radial profile has {found} peaks (need at least 2)")
            }
            Self::TooFewCandidates { found } => write!(
                f,
                "only {found} corner candidates with positive sharpness (need 4)"
            ),
        }
    }
}

/// Main error type for all solver operations
#[derive(Debug)]
pub enum SolverError {
    /// Corner detection failed for a piece
    Geometry {
        /// Piece whose contour could not be analysed
        piece: PieceId,
        /// What went wrong
        reason: GeometryFailure,
    },

    /// No piece carries the corner label, so assembly has no seed
    NoCornerPiece {
        /// Number of pieces inspected
        piece_count: usize,
    },

    /// A match would place a piece into an already occupied cell
    PlacementConflict {
        /// Target cell
        position: GridPos,
        /// Piece already occupying the cell
        occupant: PieceId,
        /// Piece the match tried to place
        incoming: PieceId,
    },

    /// A match named a piece that already sits in the grid
    PieceAlreadyPlaced {
        /// The piece returned by the oracle
        piece: PieceId,
        /// Where that piece already sits
        position: GridPos,
    },

    /// The edge oracle returned a match violating its contract
    OracleContract {
        /// Description of the violation
        reason: String,
    },

    /// Algorithm parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Puzzle document is structurally valid JSON but semantically unusable
    InvalidInput {
        /// Description of what's wrong with the input
        reason: String,
    },

    /// Failed to parse or serialize a puzzle document
    Parse {
        /// Path to the document
        path: PathBuf,
        /// Underlying serde error
        source: serde_json::Error,
    },

    /// Failed to save a rendered image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Geometry { piece, reason } => {
                write!(f, "Corner detection failed for piece {piece}: {reason}")
            }
            Self::NoCornerPiece { piece_count } => {
                write!(f, "None of the {piece_count} pieces is a corner piece")
            }
            Self::PlacementConflict {
                position,
                occupant,
                incoming,
            } => write!(
                f,
                "Placement conflict at {position}: piece {incoming} would overwrite piece {occupant}"
            ),
            Self::PieceAlreadyPlaced { piece, position } => {
                write!(f, "Piece {piece} is already placed at {position}")
            }
            Self::OracleContract { reason } => {
                write!(f, "Edge oracle contract violated: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidInput { reason } => write!(f, "Invalid puzzle input: {reason}"),
            Self::Parse { path, source } => {
                write!(f, "Failed to parse '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for SolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse { source, .. } => Some(source),
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for solver results
pub type Result<T> = std::result::Result<T, SolverError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// File being processed when the error surfaced
    pub path: Option<PathBuf>,
}

/// Extension trait for attaching [`ErrorContext`] to results
pub trait ResultExt<T> {
    /// Fill in the context path on I/O errors that were converted without one
    ///
    /// # Errors
    ///
    /// Returns the original error, enriched with the context
    fn with_context(self, context: ErrorContext) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, context: ErrorContext) -> Self {
        self.map_err(|err| match err {
            SolverError::FileSystem {
                path,
                operation,
                source,
            } if path.as_os_str() == UNKNOWN_PATH => SolverError::FileSystem {
                path: context.path.unwrap_or(path),
                operation,
                source,
            },
            other => other,
        })
    }
}

// Placeholder path for I/O errors converted without context
const UNKNOWN_PATH: &str = "<unknown>";

impl From<std::io::Error> for SolverError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from(UNKNOWN_PATH),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> SolverError {
    SolverError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid input error
pub fn invalid_input(reason: &impl ToString) -> SolverError {
    SolverError::InvalidInput {
        reason: reason.to_string(),
    }
}

/// Wrap an I/O error with the path and operation it came from
pub fn file_system(
    path: impl Into<PathBuf>,
    operation: &'static str,
) -> impl FnOnce(std::io::Error) -> SolverError {
    let path = path.into();
    move |source| SolverError::FileSystem {
        path,
        operation,
        source,
    }
}
