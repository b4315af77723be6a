//! Seeded synthetic puzzles
//!
//! A synthetic puzzle cuts a `rows × cols` board into square pieces with a
//! semicircular tab or blank on every inner side, turns each piece by a random
//! number of quarter turns, scatters the pieces in shuffled order, and scores
//! every edge pair: true mates close to [`SYNTHETIC_TRUE_DISTANCE`], other
//! tab/blank pairs no closer than [`SYNTHETIC_FALSE_DISTANCE`].

use std::f64::consts::PI;

use ndarray::Array2;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::algorithm::exclusion::EdgeRef;
use crate::algorithm::oracle::DistanceTable;
use crate::analysis::contour::{Contour, Point};
use crate::analysis::corners::CornerDetector;
use crate::io::configuration::{
    EDGES_PER_PIECE, SYNTHETIC_BUMP_RADIUS, SYNTHETIC_FALSE_DISTANCE, SYNTHETIC_PIECE_SIZE,
    SYNTHETIC_TRUE_DISTANCE,
};
use crate::io::error::{Result, invalid_parameter};
use crate::puzzle::piece::{EdgeLabel, Piece, PieceId};
use crate::spatial::grid::GridPos;
use crate::spatial::orientation::Direction;

const HALF: i32 = SYNTHETIC_PIECE_SIZE / 2;

// Body corners and outward side normals in canonical (up, right, down, left)
// order, clockwise with y pointing down
const BODY_CORNERS: [(i32, i32); EDGES_PER_PIECE] =
    [(-HALF, -HALF), (HALF, -HALF), (HALF, HALF), (-HALF, HALF)];
const SIDE_NORMALS: [(i32, i32); EDGES_PER_PIECE] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

// Contours start partway along the top side, away from any radial peak
const TRACE_START: usize = (SYNTHETIC_PIECE_SIZE / 4) as usize;

/// A generated puzzle with its ground truth
#[derive(Debug, Clone)]
pub struct SyntheticPuzzle {
    rows: usize,
    cols: usize,
    contours: Vec<Contour>,
    edges: Vec<[EdgeLabel; EDGES_PER_PIECE]>,
    homes: Vec<GridPos>,
    rotations: Vec<u8>,
    matches: Vec<(EdgeRef, EdgeRef, f64)>,
}

impl SyntheticPuzzle {
    /// Generate a reproducible `rows × cols` puzzle
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is smaller than two
    pub fn generate(rows: usize, cols: usize, seed: u64) -> Result<Self> {
        for (parameter, value) in [("rows", rows), ("cols", cols)] {
            if value < 2 {
                return Err(invalid_parameter(parameter, &value, &"must be at least 2"));
            }
        }
        let mut rng = StdRng::seed_from_u64(seed);
        let sides = cut_board(rows, cols, &mut rng);

        let mut homes: Vec<GridPos> = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| GridPos::new(row as i32, col as i32)))
            .collect();
        homes.shuffle(&mut rng);
        let rotations: Vec<u8> = homes.iter().map(|_| rng.random_range(0..4)).collect();

        let width = ((homes.len() as f64).sqrt().ceil() as usize).max(1);
        let spacing = SYNTHETIC_PIECE_SIZE + 4 * SYNTHETIC_BUMP_RADIUS;
        let mut contours = Vec::with_capacity(homes.len());
        let mut edges = Vec::with_capacity(homes.len());
        for (index, (home, &turns)) in homes.iter().zip(&rotations).enumerate() {
            let canonical = sides
                .get((home.row as usize, home.col as usize))
                .copied()
                .unwrap_or([EdgeLabel::Flat; EDGES_PER_PIECE]);
            let offset = (
                (index % width) as i32 * spacing + spacing / 2,
                (index / width) as i32 * spacing + spacing / 2,
            );
            contours.push(trace_piece(&canonical, turns, offset));
            edges.push(local_edges(&canonical, turns));
        }

        let mut puzzle = Self {
            rows,
            cols,
            contours,
            edges,
            homes,
            rotations,
            matches: Vec::new(),
        };
        puzzle.matches = puzzle.score_pairs(&mut rng);
        Ok(puzzle)
    }

    /// Board height in pieces
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Board width in pieces
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Number of pieces
    pub fn piece_count(&self) -> usize {
        self.contours.len()
    }

    /// Piece contours in id order
    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    /// Edge labels in id order, indexed by local edge
    pub fn edges(&self) -> &[[EdgeLabel; EDGES_PER_PIECE]] {
        &self.edges
    }

    /// Board cell a piece was cut from
    pub fn home(&self, piece: PieceId) -> Option<GridPos> {
        self.homes.get(piece.0).copied()
    }

    /// Clockwise quarter turns applied to a piece
    pub fn rotation(&self, piece: PieceId) -> Option<u8> {
        self.rotations.get(piece.0).copied()
    }

    /// Every scored edge pair with its distance
    pub fn matches(&self) -> &[(EdgeRef, EdgeRef, f64)] {
        &self.matches
    }

    /// Whether two edges were cut from the same board seam
    pub fn is_true_mate(&self, a: EdgeRef, b: EdgeRef) -> bool {
        let (Some(side_a), Some(side_b)) = (self.canonical_side(a), self.canonical_side(b)) else {
            return false;
        };
        let (Some(home_a), Some(home_b)) = (self.home(a.piece), self.home(b.piece)) else {
            return false;
        };
        home_a.step(side_a) == home_b && side_b == side_a.opposite()
    }

    /// Distance table oracle over the scored pairs
    ///
    /// # Errors
    ///
    /// Returns an error if a scored pair is malformed
    pub fn table(&self) -> Result<DistanceTable> {
        let mut table = DistanceTable::new(self.piece_count());
        for &(a, b, distance) in &self.matches {
            table.set(a, b, distance)?;
        }
        Ok(table)
    }

    /// Detect corners and build the pieces
    ///
    /// # Errors
    ///
    /// Returns an error if corner detection fails for any piece
    pub fn pieces(&self, detector: &CornerDetector) -> Result<Vec<Piece>> {
        let corners = detector.detect_all(&self.contours)?;
        Ok(self
            .contours
            .iter()
            .zip(&self.edges)
            .zip(corners)
            .enumerate()
            .map(|(i, ((contour, &edges), corners))| {
                Piece::new(PieceId(i), contour.clone(), corners, edges)
            })
            .collect())
    }

    fn canonical_side(&self, slot: EdgeRef) -> Option<Direction> {
        let turns = self.rotation(slot.piece)?;
        (usize::from(slot.edge) < EDGES_PER_PIECE).then(|| {
            Direction::from_index(
                (usize::from(slot.edge) + EDGES_PER_PIECE - usize::from(turns)) % EDGES_PER_PIECE,
            )
        })
    }

    fn score_pairs(&self, rng: &mut StdRng) -> Vec<(EdgeRef, EdgeRef, f64)> {
        let mut pairs = Vec::new();
        for a in 0..self.piece_count() {
            for b in a + 1..self.piece_count() {
                for edge_a in 0..EDGES_PER_PIECE as u8 {
                    for edge_b in 0..EDGES_PER_PIECE as u8 {
                        let slot_a = EdgeRef::new(PieceId(a), edge_a);
                        let slot_b = EdgeRef::new(PieceId(b), edge_b);
                        let complementary = matches!(
                            (self.label(slot_a), self.label(slot_b)),
                            (Some(EdgeLabel::Tab), Some(EdgeLabel::Blank))
                                | (Some(EdgeLabel::Blank), Some(EdgeLabel::Tab))
                        );
                        if !complementary {
                            continue;
                        }
                        let base = if self.is_true_mate(slot_a, slot_b) {
                            SYNTHETIC_TRUE_DISTANCE
                        } else {
                            SYNTHETIC_FALSE_DISTANCE
                        };
                        pairs.push((slot_a, slot_b, base * (1.0 + rng.random::<f64>())));
                    }
                }
            }
        }
        pairs
    }

    fn label(&self, slot: EdgeRef) -> Option<EdgeLabel> {
        self.edges
            .get(slot.piece.0)
            .and_then(|edges| edges.get(usize::from(slot.edge)))
            .copied()
    }
}

/// Canonical side labels for every board cell; inner seams get a random
/// tab on one side and the matching blank on the other
fn cut_board(rows: usize, cols: usize, rng: &mut StdRng) -> Array2<[EdgeLabel; EDGES_PER_PIECE]> {
    let mut sides = Array2::from_elem((rows, cols), [EdgeLabel::Flat; EDGES_PER_PIECE]);
    let seams = (0..rows)
        .flat_map(|row| (0..cols).map(move |col| (row, col)))
        .flat_map(|cell| [(cell, Direction::Right), (cell, Direction::Down)]);
    for ((row, col), direction) in seams {
        let (drow, dcol) = direction.offset();
        let (next_row, next_col) = (row + drow as usize, col + dcol as usize);
        if next_row >= rows || next_col >= cols {
            continue;
        }
        let (here, there) = if rng.random_bool(0.5) {
            (EdgeLabel::Tab, EdgeLabel::Blank)
        } else {
            (EdgeLabel::Blank, EdgeLabel::Tab)
        };
        if let Some(side) = sides
            .get_mut((row, col))
            .and_then(|cell| cell.get_mut(direction.index()))
        {
            *side = here;
        }
        if let Some(side) = sides
            .get_mut((next_row, next_col))
            .and_then(|cell| cell.get_mut(direction.opposite().index()))
        {
            *side = there;
        }
    }
    sides
}

/// Local edge labels after `turns` clockwise quarter turns
///
/// Local edge `j` is the side facing canonical direction `j` once turned.
fn local_edges(
    canonical: &[EdgeLabel; EDGES_PER_PIECE],
    turns: u8,
) -> [EdgeLabel; EDGES_PER_PIECE] {
    let mut edges = *canonical;
    edges.rotate_right(usize::from(turns) % EDGES_PER_PIECE);
    edges
}

/// Dense clockwise outline of one piece, turned and moved to `offset`
fn trace_piece(
    canonical: &[EdgeLabel; EDGES_PER_PIECE],
    turns: u8,
    offset: (i32, i32),
) -> Contour {
    let radius = SYNTHETIC_BUMP_RADIUS;
    let mut points = Vec::new();
    let sides = BODY_CORNERS
        .iter()
        .zip(BODY_CORNERS.iter().cycle().skip(1))
        .zip(SIDE_NORMALS)
        .zip(canonical);
    for (((&start, &end), normal), &label) in sides {
        let along = ((end.0 - start.0).signum(), (end.1 - start.1).signum());
        let at = move |t: i32| (start.0 + along.0 * t, start.1 + along.1 * t);
        let sign = match label {
            EdgeLabel::Flat => {
                points.extend((0..SYNTHETIC_PIECE_SIZE).map(at));
                continue;
            }
            EdgeLabel::Tab => 1.0,
            EdgeLabel::Blank => -1.0,
        };
        points.extend((0..HALF - radius).map(at));
        let mid = at(HALF);
        let steps = (PI * f64::from(radius)).round() as usize;
        points.extend((0..steps).map(|j| {
            let theta = PI * (1.0 - j as f64 / steps as f64);
            let u = f64::from(radius) * theta.cos();
            let v = sign * f64::from(radius) * theta.sin();
            (
                (f64::from(mid.0) + f64::from(along.0) * u + f64::from(normal.0) * v).round()
                    as i32,
                (f64::from(mid.1) + f64::from(along.1) * u + f64::from(normal.1) * v).round()
                    as i32,
            )
        }));
        points.extend((HALF + radius..SYNTHETIC_PIECE_SIZE).map(at));
    }
    let start = TRACE_START.min(points.len());
    points.rotate_left(start);

    points
        .into_iter()
        .map(|(x, y)| {
            let (tx, ty) = (0..turns % 4).fold((x, y), |(px, py), _| (-py, px));
            Point::new(tx + offset.0, ty + offset.1)
        })
        .collect()
}
