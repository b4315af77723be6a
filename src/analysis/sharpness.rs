//! Sharpness scoring of radial peaks
//!
//! A true corner is a point where the radius falls off steeply on both sides
//! along the boundary. A broad bulge (a tab, or the gentle curve of a side)
//! falls off slowly on at least one side, or rises, and scores zero.

use crate::analysis::profile::RadialProfile;

/// Score every peak by the radial drop at `±offset` contour indices
///
/// With `rho_max` the largest radius among `peaks`, the drop on one side is
/// `max(0, rho_max - rho_max * rho(p ± offset) / rho(p))` and the score is the
/// product of both sides. Scores are returned in the order of `peaks`.
pub fn sharpness_scores(profile: &RadialProfile, peaks: &[usize], offset: usize) -> Vec<f64> {
    let rho_max = peaks
        .iter()
        .filter_map(|&p| profile.rho(p))
        .fold(f64::NEG_INFINITY, f64::max);
    let step = isize::try_from(offset).unwrap_or(isize::MAX);

    peaks
        .iter()
        .map(|&p| {
            let Some(center) = profile.rho(p).filter(|&r| r > 0.0) else {
                return 0.0;
            };
            let drop = |side: Option<f64>| {
                side.map_or(0.0, |r| (rho_max - rho_max * r / center).max(0.0))
            };
            drop(profile.rho_wrapped(p, -step)) * drop(profile.rho_wrapped(p, step))
        })
        .collect()
}
