//! Edge similarity oracle consumed by the grid assembler
//!
//! The assembler never measures edge similarity itself. It asks an
//! [`EdgeOracle`] for the best open mate of one edge among a set of candidate
//! pieces. [`DistanceTable`] is a concrete oracle backed by precomputed
//! pairwise distances; closures can be used as oracles for injection in tests.

use ndarray::Array4;

use crate::algorithm::exclusion::{EdgeRef, ExclusionSet};
use crate::io::configuration::EDGES_PER_PIECE;
use crate::io::error::{Result, invalid_parameter};
use crate::puzzle::piece::PieceId;

/// Answer to a closest-edge query
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeMatch {
    /// Best mating edge and its distance (lower is better)
    Found {
        /// Local edge index on the matched piece
        edge: u8,
        /// Matched piece
        piece: PieceId,
        /// Dissimilarity between the two edges
        distance: f64,
    },
    /// No candidate edge mates with the query
    NotFound,
}

impl EdgeMatch {
    /// Matched slot, if any
    pub const fn slot(&self) -> Option<EdgeRef> {
        match *self {
            Self::Found { edge, piece, .. } => Some(EdgeRef::new(piece, edge)),
            Self::NotFound => None,
        }
    }

    /// Match distance, if any
    pub const fn distance(&self) -> Option<f64> {
        match *self {
            Self::Found { distance, .. } => Some(distance),
            Self::NotFound => None,
        }
    }
}

/// Source of pairwise edge similarity
///
/// Implementations must never return a slot contained in `without`, the query
/// piece itself, or a piece outside `candidates`. Queries may run
/// concurrently, hence the `Sync` bound.
pub trait EdgeOracle: Sync {
    /// Best mate of `query` among the open edges of `candidates`
    fn closest_edge(
        &self,
        query: EdgeRef,
        candidates: &[PieceId],
        without: &ExclusionSet,
    ) -> EdgeMatch;
}

impl<F> EdgeOracle for F
where
    F: Fn(EdgeRef, &[PieceId], &ExclusionSet) -> EdgeMatch + Sync,
{
    fn closest_edge(
        &self,
        query: EdgeRef,
        candidates: &[PieceId],
        without: &ExclusionSet,
    ) -> EdgeMatch {
        self(query, candidates, without)
    }
}

/// Dense table of edge-to-edge distances
///
/// Indexed `[piece_a, edge_a, piece_b, edge_b]`; pairs never set are
/// incompatible (`+∞`). An optional validity threshold turns every pair above
/// it into "no match".
#[derive(Debug, Clone)]
pub struct DistanceTable {
    distances: Array4<f64>,
    max_distance: Option<f64>,
}

impl DistanceTable {
    /// Table for `piece_count` pieces with every pair incompatible
    pub fn new(piece_count: usize) -> Self {
        Self {
            distances: Array4::from_elem(
                (piece_count, EDGES_PER_PIECE, piece_count, EDGES_PER_PIECE),
                f64::INFINITY,
            ),
            max_distance: None,
        }
    }

    /// Reject pairs whose distance exceeds `max_distance`
    #[must_use]
    pub const fn with_max_distance(mut self, max_distance: Option<f64>) -> Self {
        self.max_distance = max_distance;
        self
    }

    /// Number of pieces covered
    pub fn piece_count(&self) -> usize {
        self.distances.dim().0
    }

    /// Record a symmetric distance between two edges
    ///
    /// # Errors
    ///
    /// Returns an error if either slot is out of range, both slots belong to
    /// the same piece, or the distance is NaN or negative
    pub fn set(&mut self, a: EdgeRef, b: EdgeRef, distance: f64) -> Result<()> {
        let count = self.piece_count();
        for slot in [a, b] {
            if slot.piece.0 >= count || usize::from(slot.edge) >= EDGES_PER_PIECE {
                return Err(invalid_parameter(
                    "edge",
                    &slot,
                    &format!("outside a table of {count} pieces"),
                ));
            }
        }
        if a.piece == b.piece {
            return Err(invalid_parameter(
                "edge",
                &format!("{a} ~ {b}"),
                &"a piece cannot mate with itself",
            ));
        }
        if distance.is_nan() || distance < 0.0 {
            return Err(invalid_parameter(
                "distance",
                &distance,
                &"must be a non-negative number",
            ));
        }
        for (x, y) in [(a, b), (b, a)] {
            if let Some(cell) = self.distances.get_mut([
                x.piece.0,
                usize::from(x.edge),
                y.piece.0,
                usize::from(y.edge),
            ]) {
                *cell = distance;
            }
        }
        Ok(())
    }

    /// Stored distance between two edges
    pub fn distance(&self, a: EdgeRef, b: EdgeRef) -> Option<f64> {
        self.distances
            .get([
                a.piece.0,
                usize::from(a.edge),
                b.piece.0,
                usize::from(b.edge),
            ])
            .copied()
    }

    fn is_valid(&self, distance: f64) -> bool {
        distance.is_finite() && self.max_distance.is_none_or(|max| distance <= max)
    }
}

impl EdgeOracle for DistanceTable {
    fn closest_edge(
        &self,
        query: EdgeRef,
        candidates: &[PieceId],
        without: &ExclusionSet,
    ) -> EdgeMatch {
        let mut best = EdgeMatch::NotFound;
        for &piece in candidates {
            if piece == query.piece {
                continue;
            }
            for edge in 0..EDGES_PER_PIECE as u8 {
                let slot = EdgeRef::new(piece, edge);
                if without.contains(slot) {
                    continue;
                }
                let Some(distance) = self.distance(query, slot).filter(|&d| self.is_valid(d))
                else {
                    continue;
                };
                if best.distance().is_none_or(|current| distance < current) {
                    best = EdgeMatch::Found {
                        edge,
                        piece,
                        distance,
                    };
                }
            }
        }
        best
    }
}
