//! Puzzle pieces and the edge labels produced by edge classification

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::contour::Contour;
use crate::analysis::corners::CornerSet;
use crate::io::configuration::EDGES_PER_PIECE;

/// Dense piece identifier, equal to the piece's position in the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceId(pub usize);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Classification of one piece edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeLabel {
    /// Straight outer side of the puzzle
    Flat,
    /// Protruding knob
    Tab,
    /// Indented socket
    Blank,
}

/// Role of a piece in the finished puzzle, derived from its edge labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceLabel {
    /// Two cyclically adjacent flat edges
    Corner,
    /// At least one flat edge, none adjacent to another
    Border,
    /// No flat edge
    Interior,
}

impl PieceLabel {
    /// Derive the label from four edge labels
    pub fn from_edges(edges: &[EdgeLabel; EDGES_PER_PIECE]) -> Self {
        if flat_pair_start(edges).is_some() {
            Self::Corner
        } else if edges.contains(&EdgeLabel::Flat) {
            Self::Border
        } else {
            Self::Interior
        }
    }
}

/// First edge of an adjacent flat pair `(k, k+1 mod 4)`
///
/// When several pairs exist, the one whose second edge has the highest index
/// wins, so three flat edges `0, 1, 2` yield `1`.
pub fn flat_pair_start(edges: &[EdgeLabel; EDGES_PER_PIECE]) -> Option<u8> {
    (0..EDGES_PER_PIECE)
        .rev()
        .find(|&i| {
            let prev = (i + EDGES_PER_PIECE - 1) % EDGES_PER_PIECE;
            edges.get(i) == Some(&EdgeLabel::Flat) && edges.get(prev) == Some(&EdgeLabel::Flat)
        })
        .map(|i| ((i + EDGES_PER_PIECE - 1) % EDGES_PER_PIECE) as u8)
}

/// A segmented piece with its corners and classified edges
///
/// Edge `k` runs from corner `k` to corner `k + 1` in contour order.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    id: PieceId,
    contour: Contour,
    corners: CornerSet,
    edges: [EdgeLabel; EDGES_PER_PIECE],
}

impl Piece {
    /// Assemble a piece
    pub const fn new(
        id: PieceId,
        contour: Contour,
        corners: CornerSet,
        edges: [EdgeLabel; EDGES_PER_PIECE],
    ) -> Self {
        Self {
            id,
            contour,
            corners,
            edges,
        }
    }

    /// Piece identifier
    pub const fn id(&self) -> PieceId {
        self.id
    }

    /// Boundary contour
    pub const fn contour(&self) -> &Contour {
        &self.contour
    }

    /// Detected corners
    pub const fn corners(&self) -> &CornerSet {
        &self.corners
    }

    /// Edge labels in local edge order
    pub const fn edges(&self) -> &[EdgeLabel; EDGES_PER_PIECE] {
        &self.edges
    }

    /// Label of one local edge
    pub fn edge(&self, index: u8) -> Option<EdgeLabel> {
        self.edges.get(usize::from(index)).copied()
    }

    /// Corner, border or interior
    pub fn label(&self) -> PieceLabel {
        PieceLabel::from_edges(&self.edges)
    }
}
