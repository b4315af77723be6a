//! Sparse placement grid that grows in every direction on demand
//!
//! Cells live in a hash map keyed by signed `(row, col)` coordinates, so
//! growing the grid never shifts or reallocates existing cells. Bounds are
//! tracked as a running min/max over occupied cells. A dense snapshot is
//! available for renderers.

use std::collections::HashMap;
use std::fmt;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::puzzle::piece::PieceId;
use crate::spatial::orientation::{Direction, EdgeOrientation};

/// Signed grid coordinate; the seed piece sits at the origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    /// Row, increasing downwards
    pub row: i32,
    /// Column, increasing rightwards
    pub col: i32,
}

impl GridPos {
    /// The seed position
    pub const ORIGIN: Self = Self { row: 0, col: 0 };

    /// Create a position
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Neighbouring position in `direction`
    pub const fn step(self, direction: Direction) -> Self {
        let (dr, dc) = direction.offset();
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Inclusive bounding box of occupied cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBounds {
    /// Top-left corner (inclusive)
    pub min: GridPos,
    /// Bottom-right corner (inclusive)
    pub max: GridPos,
}

impl GridBounds {
    /// Box covering a single position
    pub const fn at(pos: GridPos) -> Self {
        Self { min: pos, max: pos }
    }

    /// Smallest box covering `self` and `pos`
    #[must_use]
    pub fn including(self, pos: GridPos) -> Self {
        Self {
            min: GridPos::new(self.min.row.min(pos.row), self.min.col.min(pos.col)),
            max: GridPos::new(self.max.row.max(pos.row), self.max.col.max(pos.col)),
        }
    }

    /// Whether the position lies inside the box
    pub const fn contains(&self, pos: GridPos) -> bool {
        pos.row >= self.min.row
            && pos.row <= self.max.row
            && pos.col >= self.min.col
            && pos.col <= self.max.col
    }

    /// Number of rows spanned
    pub const fn rows(&self) -> usize {
        (self.max.row - self.min.row + 1) as usize
    }

    /// Number of columns spanned
    pub const fn cols(&self) -> usize {
        (self.max.col - self.min.col + 1) as usize
    }
}

/// Content of an occupied cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Piece placed in the cell
    pub piece: PieceId,
    /// Local edge index facing each canonical direction
    pub orientation: EdgeOrientation,
}

/// Sparse grid of placed pieces
#[derive(Debug, Clone, Default)]
pub struct PuzzleGrid {
    cells: HashMap<GridPos, Cell>,
    positions: HashMap<PieceId, GridPos>,
    bounds: Option<GridBounds>,
}

impl PuzzleGrid {
    /// Create an empty grid
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no piece has been placed
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Bounding box of occupied cells
    pub const fn bounds(&self) -> Option<GridBounds> {
        self.bounds
    }

    /// Rows spanned by the bounding box
    pub fn rows(&self) -> usize {
        self.bounds.map_or(0, |b| b.rows())
    }

    /// Columns spanned by the bounding box
    pub fn cols(&self) -> usize {
        self.bounds.map_or(0, |b| b.cols())
    }

    /// Cell at a position
    pub fn get(&self, pos: GridPos) -> Option<&Cell> {
        self.cells.get(&pos)
    }

    /// Where a piece has been placed
    pub fn position_of(&self, piece: PieceId) -> Option<GridPos> {
        self.positions.get(&piece).copied()
    }

    /// Whether a piece has been placed
    pub fn contains_piece(&self, piece: PieceId) -> bool {
        self.positions.contains_key(&piece)
    }

    /// Place a piece into an empty cell
    ///
    /// Returns the current occupant instead of overwriting it. Placing a
    /// piece that is already on the grid is the caller's responsibility to
    /// prevent.
    pub fn insert(&mut self, pos: GridPos, cell: Cell) -> std::result::Result<(), Cell> {
        if let Some(&occupant) = self.cells.get(&pos) {
            return Err(occupant);
        }
        self.cells.insert(pos, cell);
        self.positions.insert(cell.piece, pos);
        self.bounds = Some(
            self.bounds
                .map_or_else(|| GridBounds::at(pos), |b| b.including(pos)),
        );
        Ok(())
    }

    /// Occupied cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (GridPos, &Cell)> {
        let mut entries: Vec<(GridPos, &Cell)> =
            self.cells.iter().map(|(&pos, cell)| (pos, cell)).collect();
        entries.sort_by_key(|&(pos, _)| pos);
        entries.into_iter()
    }

    /// Dense snapshot covering the bounding box, `None` for empty cells
    ///
    /// Element `[r, c]` corresponds to `GridPos(min.row + r, min.col + c)`.
    pub fn to_dense(&self) -> Array2<Option<Cell>> {
        let Some(bounds) = self.bounds else {
            return Array2::from_elem((0, 0), None);
        };
        let mut dense = Array2::from_elem((bounds.rows(), bounds.cols()), None);
        for (&pos, &cell) in &self.cells {
            let r = (pos.row - bounds.min.row) as usize;
            let c = (pos.col - bounds.min.col) as usize;
            if let Some(slot) = dense.get_mut([r, c]) {
                *slot = Some(cell);
            }
        }
        dense
    }
}
