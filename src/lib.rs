//! Jigsaw puzzle reconstruction from piece boundary contours
//!
//! Corners are found by peak analysis of each contour's radial profile, and
//! the pieces are then assembled into a grid by greedy global edge matching
//! against an external edge similarity oracle.

#![forbid(unsafe_code)]

/// Greedy grid assembly driven by an edge oracle
pub mod algorithm;
/// Contour geometry and corner detection
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Mathematical utilities for polar geometry and peak detection
pub mod math;
/// Pieces, labels, and synthetic puzzles
pub mod puzzle;
/// Directions, orientations, and the placement grid
pub mod spatial;

pub use io::error::{Result, SolverError};
