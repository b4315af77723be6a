//! Puzzle pieces and synthetic puzzle generation

/// Pieces, edge labels, and piece roles
pub mod piece;
/// Seeded synthetic puzzles for tests, benchmarks, and demos
pub mod synthetic;

pub use piece::{EdgeLabel, Piece, PieceId, PieceLabel};
