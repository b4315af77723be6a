//! Greedy global grid assembly
//!
//! Starting from a corner piece at the origin, every iteration asks the edge
//! oracle for the best mate of each open edge on the grid, commits the single
//! globally closest pairing, and places the incoming piece next to its mate.
//! The loop ends the first time no pairing exists. There is no backtracking:
//! a wrong early match is carried into the final layout.
//!
//! With [`CandidateScope::All`] the oracle may also pair two pieces that are
//! both on the grid already. Such a pairing is accepted as a join when it
//! agrees with the existing layout and is a conflict otherwise.
//!
//! All state that changes between iterations lives in [`AssemblyState`],
//! which [`GridAssembler::step`] takes and returns by value.

use std::ops::ControlFlow;

use log::{debug, info, warn};

use crate::algorithm::exclusion::{EdgeRef, ExclusionSet};
use crate::algorithm::oracle::EdgeOracle;
use crate::algorithm::search::{EdgePairing, best_pairing, frontier, unplaced};
use crate::io::configuration::EDGES_PER_PIECE;
use crate::io::error::{Result, SolverError, invalid_input, invalid_parameter};
use crate::puzzle::piece::{Piece, PieceId, PieceLabel, flat_pair_start};
use crate::spatial::grid::{Cell, GridPos, PuzzleGrid};
use crate::spatial::orientation::{Direction, EdgeOrientation};

/// What to do when a pairing targets an occupied cell or a placed piece
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Abort with [`SolverError::PlacementConflict`] or
    /// [`SolverError::PieceAlreadyPlaced`]
    #[default]
    Reject,
    /// Log the conflict, keep both edges consumed, and continue
    Skip,
}

/// Which pieces the oracle may propose as mates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CandidateScope {
    /// Only pieces not yet on the grid
    #[default]
    Unplaced,
    /// Every piece, so neighbouring placed pieces can also be joined
    All,
}

/// Assembly parameters
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AssemblyConfig {
    /// Pairings with a larger distance are treated as "no match"
    pub max_match_distance: Option<f64>,
    /// Conflict handling
    pub conflict_policy: ConflictPolicy,
    /// Pieces offered to the oracle
    pub candidate_scope: CandidateScope,
}

/// How a committed pairing changed the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchKind {
    /// The incoming piece was put on the grid
    Placed,
    /// Both pieces were already placed next to each other
    Joined,
}

/// One committed pairing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// 1-based iteration that produced the placement
    pub step: usize,
    /// Whether a piece was placed or two placed pieces were joined
    pub kind: MatchKind,
    /// Edge of the already placed piece
    pub from: EdgeRef,
    /// Edge of the incoming piece
    pub to: EdgeRef,
    /// Oracle distance of the pairing
    pub distance: f64,
    /// Direction from the placed piece to the new one
    pub direction: Direction,
    /// Cell the incoming piece occupies
    pub position: GridPos,
    /// Canonical orientation of the incoming piece
    pub orientation: EdgeOrientation,
}

/// Grid and exclusion set threaded through the assembly loop
#[derive(Debug, Clone)]
pub struct AssemblyState {
    grid: PuzzleGrid,
    without: ExclusionSet,
    placements: Vec<Placement>,
    iterations: usize,
}

impl AssemblyState {
    /// Placed pieces
    pub const fn grid(&self) -> &PuzzleGrid {
        &self.grid
    }

    /// Consumed edge slots
    pub const fn without(&self) -> &ExclusionSet {
        &self.without
    }

    /// Committed pairings in order (the seed is not a placement)
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Iterations run so far, including skipped conflicts
    pub const fn iterations(&self) -> usize {
        self.iterations
    }

    fn finish(self, cancelled: bool) -> Assembly {
        Assembly {
            grid: self.grid,
            without: self.without,
            placements: self.placements,
            cancelled,
        }
    }
}

/// Outcome of one iteration
#[derive(Debug)]
pub enum Step {
    /// A pairing was committed
    Matched {
        /// State after the pairing
        state: AssemblyState,
        /// What was placed or joined where
        placement: Placement,
    },
    /// The best pairing conflicted with the grid and was dropped
    Skipped {
        /// State after consuming the pairing's edges
        state: AssemblyState,
        /// The dropped pairing
        pairing: EdgePairing,
    },
    /// No pairing remains; the state is final
    Exhausted(AssemblyState),
}

/// Final, frozen result of an assembly run
#[derive(Debug, Clone)]
pub struct Assembly {
    /// Placed pieces and their orientations
    pub grid: PuzzleGrid,
    /// Every edge slot consumed by a match
    pub without: ExclusionSet,
    /// Committed pairings in order
    pub placements: Vec<Placement>,
    /// Whether an observer stopped the run early
    pub cancelled: bool,
}

impl Assembly {
    /// Pieces that never made it onto the grid
    pub fn unplaced(&self, piece_count: usize) -> Vec<PieceId> {
        unplaced(&self.grid, piece_count)
    }

    /// Whether every piece was placed
    pub fn is_complete(&self, piece_count: usize) -> bool {
        self.grid.len() == piece_count
    }
}

/// Hook invoked after every committed pairing
///
/// Returning [`ControlFlow::Break`] cancels the run before the next
/// iteration. Observers never influence which pairing wins.
pub trait AssemblyObserver {
    /// Called once per placement with the updated grid
    fn on_placement(&mut self, placement: &Placement, grid: &PuzzleGrid) -> ControlFlow<()>;
}

impl AssemblyObserver for () {
    fn on_placement(&mut self, _placement: &Placement, _grid: &PuzzleGrid) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

impl<A: AssemblyObserver, B: AssemblyObserver> AssemblyObserver for (A, B) {
    fn on_placement(&mut self, placement: &Placement, grid: &PuzzleGrid) -> ControlFlow<()> {
        let first = self.0.on_placement(placement, grid);
        let second = self.1.on_placement(placement, grid);
        if first.is_break() || second.is_break() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

impl<T: AssemblyObserver> AssemblyObserver for Option<T> {
    fn on_placement(&mut self, placement: &Placement, grid: &PuzzleGrid) -> ControlFlow<()> {
        self.as_mut()
            .map_or(ControlFlow::Continue(()), |inner| inner.on_placement(placement, grid))
    }
}

impl<T: AssemblyObserver + ?Sized> AssemblyObserver for &mut T {
    fn on_placement(&mut self, placement: &Placement, grid: &PuzzleGrid) -> ControlFlow<()> {
        (**self).on_placement(placement, grid)
    }
}

/// Greedy assembler; holds configuration only
#[derive(Clone, Copy, Debug, Default)]
pub struct GridAssembler {
    config: AssemblyConfig,
}

impl GridAssembler {
    /// Create an assembler with validated parameters
    ///
    /// # Errors
    ///
    /// Returns an error if the distance threshold is NaN or negative
    pub fn new(config: AssemblyConfig) -> Result<Self> {
        if let Some(max) = config
            .max_match_distance
            .filter(|max| max.is_nan() || *max < 0.0)
        {
            return Err(invalid_parameter(
                "max_match_distance",
                &max,
                &"must be a non-negative number",
            ));
        }
        Ok(Self { config })
    }

    /// Active parameters
    pub const fn config(&self) -> &AssemblyConfig {
        &self.config
    }

    /// Place the seed corner piece at the origin
    ///
    /// The seed is the first corner piece in input order. Its orientation puts
    /// its two flat edges up and left, so the puzzle grows right and down.
    ///
    /// # Errors
    ///
    /// Returns an error if piece ids do not match their input positions or no
    /// piece is a corner piece
    pub fn seed(&self, pieces: &[Piece]) -> Result<AssemblyState> {
        if let Some((index, piece)) = pieces
            .iter()
            .enumerate()
            .find(|(i, p)| p.id() != PieceId(*i))
        {
            return Err(invalid_input(&format!(
                "piece at position {index} has id {}",
                piece.id()
            )));
        }

        let (seed, first_edge) = pieces
            .iter()
            .filter(|p| p.label() == PieceLabel::Corner)
            .find_map(|p| flat_pair_start(p.edges()).map(|edge| (p.id(), edge)))
            .ok_or(SolverError::NoCornerPiece {
                piece_count: pieces.len(),
            })?;

        let mut grid = PuzzleGrid::new();
        let orientation = EdgeOrientation::seed(first_edge);
        grid.insert(
            GridPos::ORIGIN,
            Cell {
                piece: seed,
                orientation,
            },
        )
        .map_err(|occupant| SolverError::PlacementConflict {
            position: GridPos::ORIGIN,
            occupant: occupant.piece,
            incoming: seed,
        })?;
        info!(
            "seeding {} pieces with corner piece {seed} (orientation {:?})",
            pieces.len(),
            orientation.edges()
        );

        Ok(AssemblyState {
            grid,
            without: ExclusionSet::new(pieces.len()),
            placements: Vec::new(),
            iterations: 0,
        })
    }

    /// Run one iteration: find the global best pairing and commit it
    ///
    /// # Errors
    ///
    /// Returns an error if the oracle violates its contract, or the pairing
    /// conflicts with the grid under [`ConflictPolicy::Reject`]
    pub fn step<O>(&self, mut state: AssemblyState, pieces: &[Piece], oracle: &O) -> Result<Step>
    where
        O: EdgeOracle + ?Sized,
    {
        let open = frontier(&state.grid, &state.without);
        let candidates = match self.config.candidate_scope {
            CandidateScope::Unplaced => unplaced(&state.grid, pieces.len()),
            CandidateScope::All => (0..pieces.len()).map(PieceId).collect(),
        };
        if open.is_empty() || candidates.is_empty() {
            return Ok(Step::Exhausted(state));
        }

        let Some(pairing) = best_pairing(
            oracle,
            &open,
            &candidates,
            &state.without,
            self.config.max_match_distance,
        ) else {
            return Ok(Step::Exhausted(state));
        };
        Self::check_contract(&pairing, &candidates, &state.without)?;

        state.iterations += 1;
        state.without.insert(pairing.from);
        state.without.insert(pairing.to);

        let anchor = state
            .grid
            .position_of(pairing.from.piece)
            .ok_or_else(|| {
                invalid_input(&format!(
                    "frontier piece {} is not placed",
                    pairing.from.piece
                ))
            })?;
        let direction = state
            .grid
            .get(anchor)
            .and_then(|cell| cell.orientation.direction_of(pairing.from.edge))
            .ok_or_else(|| {
                invalid_input(&format!("edge {} has no orientation", pairing.from))
            })?;
        let position = anchor.step(direction);
        let orientation = EdgeOrientation::facing(pairing.to.edge, direction.opposite());
        let cell = Cell {
            piece: pairing.to.piece,
            orientation,
        };

        let kind = if let Some(existing) = state.grid.position_of(pairing.to.piece) {
            if existing != position || state.grid.get(existing) != Some(&cell) {
                let conflict = SolverError::PieceAlreadyPlaced {
                    piece: pairing.to.piece,
                    position: existing,
                };
                return self.resolve_conflict(state, pairing, conflict);
            }
            MatchKind::Joined
        } else {
            if let Err(occupant) = state.grid.insert(position, cell) {
                let conflict = SolverError::PlacementConflict {
                    position,
                    occupant: occupant.piece,
                    incoming: pairing.to.piece,
                };
                return self.resolve_conflict(state, pairing, conflict);
            }
            MatchKind::Placed
        };

        let placement = Placement {
            step: state.iterations,
            kind,
            from: pairing.from,
            to: pairing.to,
            distance: pairing.distance,
            direction,
            position,
            orientation,
        };
        debug!(
            "step {}: {} -> {} {direction} of {}, at {position} ({kind:?}, distance {:.3})",
            placement.step, pairing.from, pairing.to, pairing.from.piece, pairing.distance
        );
        state.placements.push(placement);
        Ok(Step::Matched { state, placement })
    }

    /// Assemble all pieces, notifying `observer` after each placement
    ///
    /// # Errors
    ///
    /// Returns an error if seeding fails or any iteration fails
    pub fn run<O, V>(&self, pieces: &[Piece], oracle: &O, observer: &mut V) -> Result<Assembly>
    where
        O: EdgeOracle + ?Sized,
        V: AssemblyObserver + ?Sized,
    {
        let mut state = self.seed(pieces)?;
        let assembly = loop {
            match self.step(state, pieces, oracle)? {
                Step::Matched {
                    state: next,
                    placement,
                } => {
                    if observer.on_placement(&placement, &next.grid).is_break() {
                        info!("assembly cancelled after step {}", placement.step);
                        break next.finish(true);
                    }
                    state = next;
                }
                Step::Skipped { state: next, .. } => state = next,
                Step::Exhausted(done) => break done.finish(false),
            }
        };
        info!(
            "placed {} of {} pieces in {} matches",
            assembly.grid.len(),
            pieces.len(),
            assembly.placements.len()
        );
        Ok(assembly)
    }

    fn check_contract(
        pairing: &EdgePairing,
        candidates: &[PieceId],
        without: &ExclusionSet,
    ) -> Result<()> {
        let to = pairing.to;
        let reason = if candidates.binary_search(&to.piece).is_err() {
            format!("matched piece {} is not a candidate", to.piece)
        } else if usize::from(to.edge) >= EDGES_PER_PIECE {
            format!("matched edge {to} is out of range")
        } else if to.piece == pairing.from.piece {
            format!("edge {} matched its own piece", pairing.from)
        } else if without.contains(to) {
            format!("matched edge {to} was already consumed")
        } else {
            return Ok(());
        };
        Err(SolverError::OracleContract { reason })
    }

    fn resolve_conflict(
        &self,
        state: AssemblyState,
        pairing: EdgePairing,
        conflict: SolverError,
    ) -> Result<Step> {
        match self.config.conflict_policy {
            ConflictPolicy::Reject => Err(conflict),
            ConflictPolicy::Skip => {
                warn!(
                    "skipping pairing {} ~ {}: {conflict}",
                    pairing.from, pairing.to
                );
                Ok(Step::Skipped { state, pairing })
            }
        }
    }
}
