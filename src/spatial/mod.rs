//! Spatial data structures for the assembled puzzle
//!
//! This module contains:
//! - Canonical directions and edge orientation vectors
//! - The sparse, dynamically growing placement grid

/// Sparse placement grid with running bounds
pub mod grid;
/// Directions and per-cell edge orientation
pub mod orientation;

pub use grid::{Cell, GridPos, PuzzleGrid};
pub use orientation::{Direction, EdgeOrientation};
