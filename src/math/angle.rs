//! Polar conversion and distances between angles on the circle

use std::f64::consts::{PI, TAU};

/// Converts centred cartesian coordinates to `(rho, phi)`
///
/// `phi` lies in `(-π, π]` as returned by the four-quadrant arctangent.
#[inline]
pub fn to_polar(x: f64, y: f64) -> (f64, f64) {
    (x.hypot(y), y.atan2(x))
}

/// Maps an angle from `(-π, π]` onto `[0, 2π)`
#[inline]
pub fn to_unit_turn(phi: f64) -> f64 {
    if phi < 0.0 { TAU + phi } else { phi }
}

/// Minimal arc length in `[0, π]` between two angles given in `(-π, π]`
///
/// Both angles are first moved onto `[0, 2π)`. When their difference there
/// exceeds a half turn, any angle past `π` is re-expressed as its negative
/// complement and the difference is taken again.
pub fn angular_distance(phi1: f64, phi2: f64) -> f64 {
    let mut a = to_unit_turn(phi1);
    let mut b = to_unit_turn(phi2);
    let dist = (a - b).abs();
    if dist <= PI {
        return dist;
    }
    if a > PI {
        a -= TAU;
    }
    if b > PI {
        b -= TAU;
    }
    (a - b).abs()
}

