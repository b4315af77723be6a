use bitvec::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::io::configuration::EDGES_PER_PIECE;
use crate::puzzle::piece::PieceId;

/// One edge slot: a piece and one of its four local edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeRef {
    /// Owning piece
    pub piece: PieceId,
    /// Local edge index in `0..4`
    pub edge: u8,
}

impl EdgeRef {
    /// Create an edge slot
    pub const fn new(piece: PieceId, edge: u8) -> Self {
        Self { piece, edge }
    }

    const fn bit(self) -> usize {
        self.piece.0 * EDGES_PER_PIECE + self.edge as usize
    }
}

impl fmt::Display for EdgeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.piece, self.edge)
    }
}

/// Grow-only set of edge slots already consumed by a match
///
/// Stores one bit per `(piece, edge)` slot. Slots are never removed: once an
/// edge has been matched it is never reconsidered.
#[derive(Clone, Debug, Default)]
pub struct ExclusionSet {
    bits: BitVec,
    count: usize,
}

impl ExclusionSet {
    /// Create an empty set sized for `piece_count` pieces
    pub fn new(piece_count: usize) -> Self {
        Self {
            bits: bitvec![0; piece_count * EDGES_PER_PIECE],
            count: 0,
        }
    }

    /// Mark a slot as consumed
    ///
    /// Returns `false` if the slot was already present or the edge index is
    /// out of range. Pieces beyond the initial capacity grow the set.
    pub fn insert(&mut self, slot: EdgeRef) -> bool {
        if usize::from(slot.edge) >= EDGES_PER_PIECE {
            return false;
        }
        let bit = slot.bit();
        if bit >= self.bits.len() {
            self.bits.resize((slot.piece.0 + 1) * EDGES_PER_PIECE, false);
        }
        if self.contains(slot) {
            return false;
        }
        self.bits.set(bit, true);
        self.count += 1;
        true
    }

    /// Test slot membership
    pub fn contains(&self, slot: EdgeRef) -> bool {
        usize::from(slot.edge) < EDGES_PER_PIECE
            && self.bits.get(slot.bit()).as_deref() == Some(&true)
    }

    /// Local edges of `piece` not yet consumed, ascending
    pub fn open_edges(&self, piece: PieceId) -> impl Iterator<Item = u8> + '_ {
        (0..EDGES_PER_PIECE as u8).filter(move |&edge| !self.contains(EdgeRef::new(piece, edge)))
    }

    /// Number of consumed slots
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Whether no slot has been consumed
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Consumed slots in ascending `(piece, edge)` order
    pub fn iter(&self) -> impl Iterator<Item = EdgeRef> + '_ {
        self.bits.iter_ones().map(|bit| {
            EdgeRef::new(
                PieceId(bit / EDGES_PER_PIECE),
                (bit % EDGES_PER_PIECE) as u8,
            )
        })
    }
}

impl fmt::Display for ExclusionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, slot) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{slot}")?;
        }
        write!(f, "}}")
    }
}
