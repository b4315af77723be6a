//! JSON puzzle and solution documents
//!
//! A puzzle document lists every piece's contour and edge labels together
//! with the scored edge pairs that feed the [`DistanceTable`] oracle. A
//! solution document records the assembled grid.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::algorithm::assembler::Assembly;
use crate::algorithm::exclusion::EdgeRef;
use crate::algorithm::oracle::DistanceTable;
use crate::analysis::contour::Contour;
use crate::analysis::corners::{CornerDetector, CornerSet};
use crate::io::configuration::EDGES_PER_PIECE;
use crate::io::error::{Result, SolverError, file_system};
use crate::puzzle::piece::{EdgeLabel, Piece, PieceId};
use crate::puzzle::synthetic::SyntheticPuzzle;
use crate::spatial::grid::{GridBounds, GridPos};
use crate::spatial::orientation::EdgeOrientation;

/// One piece as segmented and classified upstream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceRecord {
    /// Boundary contour in image coordinates
    pub contour: Contour,
    /// Edge labels in local edge order
    pub edges: [EdgeLabel; EDGES_PER_PIECE],
}

/// A scored edge pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// First edge
    pub a: EdgeRef,
    /// Second edge
    pub b: EdgeRef,
    /// Dissimilarity, lower is better
    pub distance: f64,
}

/// Input document: pieces in id order and their pairwise edge distances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuzzleDocument {
    /// Pieces; a piece's id is its position in this list
    pub pieces: Vec<PieceRecord>,
    /// Scored edge pairs; unlisted pairs never match
    #[serde(default)]
    pub matches: Vec<MatchRecord>,
    /// Pairs scored above this distance are not matches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_distance: Option<f64>,
}

impl PuzzleDocument {
    /// Read a document from disk
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid document
    pub fn load(path: &Path) -> Result<Self> {
        read_json(path)
    }

    /// Write the document as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails
    pub fn save(&self, path: &Path) -> Result<()> {
        write_json(self, path)
    }

    /// Document describing a synthetic puzzle
    pub fn from_synthetic(puzzle: &SyntheticPuzzle) -> Self {
        Self {
            pieces: puzzle
                .contours()
                .iter()
                .zip(puzzle.edges())
                .map(|(contour, &edges)| PieceRecord {
                    contour: contour.clone(),
                    edges,
                })
                .collect(),
            matches: puzzle
                .matches()
                .iter()
                .map(|&(a, b, distance)| MatchRecord { a, b, distance })
                .collect(),
            max_distance: None,
        }
    }

    /// Contours in id order
    pub fn contours(&self) -> Vec<Contour> {
        self.pieces.iter().map(|p| p.contour.clone()).collect()
    }

    /// Detect corners and build the pieces
    ///
    /// # Errors
    ///
    /// Returns an error if corner detection fails for any piece
    pub fn build_pieces(&self, detector: &CornerDetector) -> Result<Vec<Piece>> {
        let corners = detector.detect_all(&self.contours())?;
        Ok(self
            .pieces
            .iter()
            .zip(corners)
            .enumerate()
            .map(|(i, (record, corners))| {
                Piece::new(PieceId(i), record.contour.clone(), corners, record.edges)
            })
            .collect())
    }

    /// Distance table oracle over the listed pairs
    ///
    /// # Errors
    ///
    /// Returns an error if a pair references a missing piece or edge, pairs a
    /// piece with itself, or carries an invalid distance
    pub fn table(&self) -> Result<DistanceTable> {
        let mut table = DistanceTable::new(self.pieces.len()).with_max_distance(self.max_distance);
        for record in &self.matches {
            table.set(record.a, record.b, record.distance)?;
        }
        Ok(table)
    }
}

/// One placed cell of a solution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRecord {
    /// Grid position relative to the seed
    pub position: GridPos,
    /// Piece in the cell
    pub piece: PieceId,
    /// Local edge facing up, right, down and left
    pub orientation: EdgeOrientation,
}

/// Output document: the assembled layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionDocument {
    /// Occupied extent, absent when nothing was placed
    pub bounds: Option<GridBounds>,
    /// Placed cells in row-major order
    pub cells: Vec<CellRecord>,
    /// Detected corners of every piece, in id order
    pub corners: Vec<CornerSet>,
    /// Pieces that never joined the grid
    pub unplaced: Vec<PieceId>,
    /// Number of committed pairings
    pub matches: usize,
    /// Whether the run was stopped early
    pub cancelled: bool,
}

impl SolutionDocument {
    /// Summarize an assembly of `pieces`
    pub fn new(assembly: &Assembly, pieces: &[Piece]) -> Self {
        Self {
            bounds: assembly.grid.bounds(),
            cells: assembly
                .grid
                .iter()
                .map(|(position, cell)| CellRecord {
                    position,
                    piece: cell.piece,
                    orientation: cell.orientation,
                })
                .collect(),
            corners: pieces.iter().map(|p| *p.corners()).collect(),
            unplaced: assembly.unplaced(pieces.len()),
            matches: assembly.placements.len(),
            cancelled: assembly.cancelled,
        }
    }

    /// Read a solution from disk
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid document
    pub fn load(path: &Path) -> Result<Self> {
        read_json(path)
    }

    /// Write the solution as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails
    pub fn save(&self, path: &Path) -> Result<()> {
        write_json(self, path)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).map_err(file_system(path, "read"))?;
    serde_json::from_str(&text).map_err(|source| SolverError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let text = serde_json::to_string_pretty(value).map_err(|source| SolverError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, text).map_err(file_system(path, "write"))
}
