//! Global best-match search over the open frontier of the grid

use std::cmp::Ordering;

use log::{debug, warn};
use rayon::prelude::*;

use crate::algorithm::exclusion::{EdgeRef, ExclusionSet};
use crate::algorithm::oracle::EdgeOracle;
use crate::puzzle::piece::PieceId;
use crate::spatial::grid::PuzzleGrid;

/// A proposed match between an open edge on the grid and an unplaced piece
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgePairing {
    /// Open edge of a placed piece
    pub from: EdgeRef,
    /// Mating edge of the incoming piece
    pub to: EdgeRef,
    /// Oracle distance between the two edges
    pub distance: f64,
}

/// Open edges of every placed piece, in row-major grid order then edge order
pub fn frontier(grid: &PuzzleGrid, without: &ExclusionSet) -> Vec<EdgeRef> {
    grid.iter()
        .flat_map(|(_, cell)| {
            let piece = cell.piece;
            without
                .open_edges(piece)
                .map(move |edge| EdgeRef::new(piece, edge))
        })
        .collect()
}

/// Pieces `0..piece_count` not yet on the grid, ascending
pub fn unplaced(grid: &PuzzleGrid, piece_count: usize) -> Vec<PieceId> {
    (0..piece_count)
        .map(PieceId)
        .filter(|&piece| !grid.contains_piece(piece))
        .collect()
}

/// Globally smallest-distance pairing over the whole frontier
///
/// Every frontier edge is queried independently and in parallel. Ties are
/// broken by frontier order, so the answer equals a sequential scan that
/// keeps the first strict minimum. Pairings above `max_distance` and NaN
/// distances are discarded.
pub fn best_pairing<O>(
    oracle: &O,
    frontier: &[EdgeRef],
    candidates: &[PieceId],
    without: &ExclusionSet,
    max_distance: Option<f64>,
) -> Option<EdgePairing>
where
    O: EdgeOracle + ?Sized,
{
    frontier
        .par_iter()
        .enumerate()
        .filter_map(|(order, &from)| {
            let found = oracle.closest_edge(from, candidates, without);
            let (Some(to), Some(distance)) = (found.slot(), found.distance()) else {
                return None;
            };
            if distance.is_nan() {
                warn!("oracle returned NaN distance for {from}; ignoring");
                return None;
            }
            if max_distance.is_some_and(|max| distance > max) {
                debug!("rejecting {from} ~ {to} at distance {distance:.3}");
                return None;
            }
            Some((
                order,
                EdgePairing { from, to, distance },
            ))
        })
        .min_by(|a, b| {
            a.1.distance
                .partial_cmp(&b.1.distance)
                .unwrap_or(Ordering::Equal)
                .then(a.0.cmp(&b.0))
        })
        .map(|(_, pairing)| pairing)
}
