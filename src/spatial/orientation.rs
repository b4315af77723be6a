//! Canonical directions and per-cell edge orientation vectors

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::io::configuration::EDGES_PER_PIECE;

/// Grid direction in canonical order: up, right, down, left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards decreasing rows
    Up,
    /// Towards increasing columns
    Right,
    /// Towards increasing rows
    Down,
    /// Towards decreasing columns
    Left,
}

impl Direction {
    /// All directions in canonical order
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Position in canonical order (`Up = 0` .. `Left = 3`)
    pub const fn index(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Right => 1,
            Self::Down => 2,
            Self::Left => 3,
        }
    }

    /// Direction at a canonical position, wrapping modulo 4
    pub const fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Self::Up,
            1 => Self::Right,
            2 => Self::Down,
            _ => Self::Left,
        }
    }

    /// The direction pointing back
    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// `(row, col)` step to the neighbouring cell
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::Right => (0, 1),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Up => "up",
            Self::Right => "right",
            Self::Down => "down",
            Self::Left => "left",
        };
        f.write_str(name)
    }
}

/// A piece's local edge index for each canonical direction
///
/// Always a cyclic rotation of `(0, 1, 2, 3)`: placement only chooses the
/// rotation offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeOrientation([u8; EDGES_PER_PIECE]);

impl EdgeOrientation {
    /// Orientation whose `direction` slot holds local edge `edge`
    ///
    /// The remaining slots follow the piece's own cyclic edge order.
    pub fn facing(edge: u8, direction: Direction) -> Self {
        let base = direction.index();
        // (edge + k - base) mod 4, kept non-negative
        Self(std::array::from_fn(|k| {
            ((usize::from(edge) + k + EDGES_PER_PIECE - base) % EDGES_PER_PIECE) as u8
        }))
    }

    /// Orientation of a seed corner piece whose flat pair starts at
    /// `first_edge`: up and left are the two flat edges
    pub fn seed(first_edge: u8) -> Self {
        Self::facing(first_edge, Direction::Left)
    }

    /// Raw vector in canonical order
    pub const fn edges(&self) -> [u8; EDGES_PER_PIECE] {
        self.0
    }

    /// Local edge facing `direction`
    pub const fn edge_at(&self, direction: Direction) -> u8 {
        let [up, right, down, left] = self.0;
        match direction {
            Direction::Up => up,
            Direction::Right => right,
            Direction::Down => down,
            Direction::Left => left,
        }
    }

    /// Canonical direction a local edge faces
    pub fn direction_of(&self, edge: u8) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&direction| self.edge_at(direction) == edge)
    }

    /// Whether the vector is a cyclic rotation of `(0, 1, 2, 3)`
    pub fn is_valid_rotation(&self) -> bool {
        let Some(&first) = self.0.first() else {
            return false;
        };
        self.0
            .iter()
            .enumerate()
            .all(|(k, &e)| usize::from(e) == (usize::from(first) + k) % EDGES_PER_PIECE)
    }
}
