//! Corner detection from the radial profile of a piece contour
//!
//! The four physical corners of a (quasi-rectangular) piece are the points of
//! its boundary farthest from the centroid whose radius also drops sharply on
//! both sides. The detector finds radial maxima, scores their sharpness, and
//! then walks the candidates in steps of roughly a right angle starting from
//! the sharpest one.

use std::cmp::Ordering;
use std::f64::consts::FRAC_PI_2;

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::contour::Contour;
use crate::analysis::profile::RadialProfile;
use crate::analysis::sharpness::sharpness_scores;
use crate::io::configuration::{
    CORNERS_PER_PIECE, MIN_CONTOUR_LEN, PEAK_DISTANCE, RIGHT_ANGLE_TOLERANCE, SHARPNESS_OFFSET,
};
use crate::io::error::{GeometryFailure, Result, SolverError, invalid_parameter};
use crate::math::angle::angular_distance;
use crate::math::peaks::{find_peaks, merge_wrapped};
use crate::puzzle::piece::PieceId;

/// Parameters of the corner detector
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CornerConfig {
    /// Minimum index separation between radial peaks
    pub peak_distance: usize,
    /// Index offset at which the radial drop-off is measured
    pub sharpness_offset: usize,
    /// Largest accepted deviation (radians) from a right angle between
    /// consecutive corners
    pub right_angle_tolerance: f64,
    /// Contours with fewer points are rejected outright
    pub min_contour_len: usize,
}

impl Default for CornerConfig {
    fn default() -> Self {
        Self {
            peak_distance: PEAK_DISTANCE,
            sharpness_offset: SHARPNESS_OFFSET,
            right_angle_tolerance: RIGHT_ANGLE_TOLERANCE,
            min_contour_len: MIN_CONTOUR_LEN,
        }
    }
}

/// One physical corner of a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corner {
    /// Index into the piece contour
    pub index: usize,
    /// Horizontal pixel coordinate
    pub x: i32,
    /// Vertical pixel coordinate
    pub y: i32,
}

/// The four corners of a piece in ascending angle around its centroid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CornerSet([Corner; CORNERS_PER_PIECE]);

impl CornerSet {
    /// Wrap four corners that are already in angular order
    pub const fn new(corners: [Corner; CORNERS_PER_PIECE]) -> Self {
        Self(corners)
    }

    /// Corners in angular order
    pub const fn corners(&self) -> &[Corner; CORNERS_PER_PIECE] {
        &self.0
    }

    /// Contour indices of the corners in angular order
    pub fn indices(&self) -> [usize; CORNERS_PER_PIECE] {
        self.0.map(|c| c.index)
    }

    /// Iterate over the corners in angular order
    pub fn iter(&self) -> impl Iterator<Item = &Corner> {
        self.0.iter()
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    index: usize,
    phi: f64,
    sharpness: f64,
}

/// Stateless corner detector; identical contours always yield identical corners
#[derive(Debug, Clone, Copy, Default)]
pub struct CornerDetector {
    config: CornerConfig,
}

impl CornerDetector {
    /// Create a detector with validated parameters
    ///
    /// # Errors
    ///
    /// Returns an error if the peak distance or sharpness offset is zero, or
    /// the right angle tolerance is not a positive finite angle
    pub fn new(config: CornerConfig) -> Result<Self> {
        if config.peak_distance == 0 {
            return Err(invalid_parameter(
                "peak_distance",
                &config.peak_distance,
                &"must be at least 1",
            ));
        }
        if config.sharpness_offset == 0 {
            return Err(invalid_parameter(
                "sharpness_offset",
                &config.sharpness_offset,
                &"must be at least 1",
            ));
        }
        if !config.right_angle_tolerance.is_finite() || config.right_angle_tolerance <= 0.0 {
            return Err(invalid_parameter(
                "right_angle_tolerance",
                &config.right_angle_tolerance,
                &"must be a positive finite angle",
            ));
        }
        Ok(Self { config })
    }

    /// Active parameters
    pub const fn config(&self) -> &CornerConfig {
        &self.config
    }

    /// Detect the four corners of a single contour
    ///
    /// # Errors
    ///
    /// Returns a [`GeometryFailure`] if the contour is too short, has fewer
    /// than two radial peaks, or fewer than four peaks with positive sharpness
    pub fn detect(&self, contour: &Contour) -> std::result::Result<CornerSet, GeometryFailure> {
        let len = contour.len();
        if len < self.config.min_contour_len.max(1) {
            return Err(GeometryFailure::ContourTooShort { len });
        }

        let profile = RadialProfile::from_contour(contour);
        let mut peaks = find_peaks(profile.radii(), self.config.peak_distance);
        if peaks.len() < 2 {
            return Err(GeometryFailure::TooFewPeaks { found: peaks.len() });
        }
        merge_wrapped(profile.radii(), &mut peaks, self.config.peak_distance);

        let scores = sharpness_scores(&profile, &peaks, self.config.sharpness_offset);
        let mut candidates: Vec<Candidate> = peaks
            .iter()
            .zip(scores)
            .filter(|&(_, sharpness)| sharpness > 0.0)
            .filter_map(|(&index, sharpness)| {
                profile.phi(index).map(|phi| Candidate {
                    index,
                    phi,
                    sharpness,
                })
            })
            .collect();
        if candidates.len() < CORNERS_PER_PIECE {
            return Err(GeometryFailure::TooFewCandidates {
                found: candidates.len(),
            });
        }
        candidates.sort_by(|a, b| a.phi.partial_cmp(&b.phi).unwrap_or(Ordering::Equal));

        let mut chosen: Vec<Candidate> = self
            .right_angle_walk(&candidates)
            .into_iter()
            .filter_map(|i| candidates.get(i).copied())
            .collect();
        chosen.sort_by(|a, b| a.phi.partial_cmp(&b.phi).unwrap_or(Ordering::Equal));

        let found = chosen.len();
        let corners: Vec<Corner> = chosen
            .into_iter()
            .filter_map(|c| {
                contour.points().get(c.index).map(|p| Corner {
                    index: c.index,
                    x: p.x,
                    y: p.y,
                })
            })
            .collect();
        let corners: [Corner; CORNERS_PER_PIECE] = corners
            .try_into()
            .map_err(|_short: Vec<Corner>| GeometryFailure::TooFewCandidates { found })?;
        Ok(CornerSet::new(corners))
    }

    /// Detect corners for one piece, tagging failures with its id
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Geometry`] if detection fails
    pub fn detect_piece(&self, piece: PieceId, contour: &Contour) -> Result<CornerSet> {
        let corners = self
            .detect(contour)
            .map_err(|reason| SolverError::Geometry { piece, reason })?;
        debug!("piece {piece}: corners at {:?}", corners.indices());
        Ok(corners)
    }

    /// Detect corners for every contour in parallel
    ///
    /// Contour `i` belongs to piece `i`. The result matches running
    /// [`Self::detect_piece`] sequentially; on failure the lowest failing
    /// piece is reported.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Geometry`] for the first piece whose corners
    /// cannot be found
    pub fn detect_all(&self, contours: &[Contour]) -> Result<Vec<CornerSet>> {
        let results: Vec<Result<CornerSet>> = contours
            .par_iter()
            .enumerate()
            .map(|(i, contour)| self.detect_piece(PieceId(i), contour))
            .collect();
        results.into_iter().collect()
    }

    /// Greedy walk over angle-sorted candidates in steps close to a right angle
    ///
    /// Returns positions into `candidates` in the order they were chosen.
    fn right_angle_walk(&self, candidates: &[Candidate]) -> Vec<usize> {
        // max_by keeps the last of equal maxima
        let Some(start) = candidates
            .iter()
            .enumerate()
            .max_by(|a, b| {
                a.1.sharpness
                    .partial_cmp(&b.1.sharpness)
                    .unwrap_or(Ordering::Equal)
            })
            .map(|(i, _)| i)
        else {
            return Vec::new();
        };

        let mut chosen = vec![start];
        let mut current = start;
        while chosen.len() < CORNERS_PER_PIECE {
            let Some(from) = candidates.get(current) else {
                break;
            };

            let mut best: Option<(usize, f64)> = None;
            for (j, candidate) in candidates.iter().enumerate() {
                if chosen.contains(&j) {
                    continue;
                }
                let deviation = (angular_distance(from.phi, candidate.phi) - FRAC_PI_2).abs();
                if best.is_none_or(|(_, d)| deviation < d) {
                    best = Some((j, deviation));
                }
            }

            let next = match best {
                Some((j, deviation)) if deviation < self.config.right_angle_tolerance => j,
                Some(_) => match (1..candidates.len())
                    .map(|step| (current + step) % candidates.len())
                    .find(|j| !chosen.contains(j))
                {
                    Some(j) => j,
                    None => break,
                },
                None => break,
            };
            chosen.push(next);
            current = next;
        }
        chosen
    }
}
