//! Local maxima of a sampled 1D signal with minimum peak separation

use std::cmp::Ordering;

/// Indices of local maxima in `signal`
///
/// A sample is a maximum when it is strictly greater than its left neighbour
/// and the run of equal samples it starts is followed by a strictly smaller
/// one. Flat peaks report the middle of the plateau (rounded down). The two
/// endpoints are never reported.
pub fn local_maxima(signal: &[f64]) -> Vec<usize> {
    let mut peaks = Vec::new();
    let Some(last) = signal.len().checked_sub(1) else {
        return peaks;
    };

    let mut i = 1;
    while i < last {
        let (Some(&prev), Some(&current)) = (signal.get(i - 1), signal.get(i)) else {
            break;
        };
        if prev < current {
            let mut ahead = i + 1;
            while ahead < last
                && signal
                    .get(ahead)
                    .is_some_and(|v| v.total_cmp(&current).is_eq())
            {
                ahead += 1;
            }
            if signal.get(ahead).is_some_and(|&v| v < current) {
                peaks.push(usize::midpoint(i, ahead - 1));
                i = ahead;
            }
        }
        i += 1;
    }
    peaks
}

/// Local maxima of `signal`, keeping only peaks at least `min_distance` apart
///
/// Peaks are visited from highest to lowest (equal heights: later index
/// first); each surviving peak suppresses every other peak closer than
/// `min_distance` indices. Returned indices are ascending.
pub fn find_peaks(signal: &[f64], min_distance: usize) -> Vec<usize> {
    let peaks = local_maxima(signal);
    if min_distance <= 1 || peaks.len() < 2 {
        return peaks;
    }

    let height = |p: usize| signal.get(p).copied().unwrap_or(f64::NEG_INFINITY);

    // Stable ascending order by height, walked backwards
    let mut by_height: Vec<usize> = (0..peaks.len()).collect();
    by_height.sort_by(|&a, &b| {
        let ha = peaks.get(a).map_or(f64::NEG_INFINITY, |&p| height(p));
        let hb = peaks.get(b).map_or(f64::NEG_INFINITY, |&p| height(p));
        ha.partial_cmp(&hb).unwrap_or(Ordering::Equal)
    });

    let mut keep = vec![true; peaks.len()];
    for &j in by_height.iter().rev() {
        if !keep.get(j).copied().unwrap_or(false) {
            continue;
        }
        let Some(&pj) = peaks.get(j) else { continue };

        for k in (0..j).rev() {
            match peaks.get(k) {
                Some(&pk) if pj - pk < min_distance => {
                    if let Some(flag) = keep.get_mut(k) {
                        *flag = false;
                    }
                }
                _ => break,
            }
        }
        for k in j + 1..peaks.len() {
            match peaks.get(k) {
                Some(&pk) if pk - pj < min_distance => {
                    if let Some(flag) = keep.get_mut(k) {
                        *flag = false;
                    }
                }
                _ => break,
            }
        }
    }

    peaks
        .into_iter()
        .zip(keep)
        .filter_map(|(p, kept)| kept.then_some(p))
        .collect()
}

/// Resolve a pair of peaks that are too close across the wrap of a cyclic signal
///
/// When the first and last peaks are at most `min_distance` apart going
/// through index zero they are one physical feature: the first is dropped if
/// it is strictly lower than the last, otherwise the last is dropped.
pub fn merge_wrapped(signal: &[f64], peaks: &mut Vec<usize>, min_distance: usize) {
    let (Some(&first), Some(&last)) = (peaks.first(), peaks.last()) else {
        return;
    };
    if peaks.len() < 2 || first + signal.len() - last > min_distance {
        return;
    }
    let first_height = signal.get(first).copied().unwrap_or(f64::NEG_INFINITY);
    let last_height = signal.get(last).copied().unwrap_or(f64::NEG_INFINITY);
    if first_height < last_height {
        peaks.remove(0);
    } else {
        peaks.pop();
    }
}
