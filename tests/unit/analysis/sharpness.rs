//! Tests for peak sharpness scoring

#[cfg(test)]
mod tests {
    use jigsolve::analysis::contour::{Contour, Point};
    use jigsolve::analysis::profile::RadialProfile;
    use jigsolve::analysis::sharpness::sharpness_scores;

    /// Axis-aligned square of side 200 centred on (500, 500), traced
    /// clockwise from the middle of the top side
    fn square() -> Contour {
        let mut points: Vec<Point> = (0..200)
            .map(|t| Point::new(400 + t, 400))
            .chain((0..200).map(|t| Point::new(600, 400 + t)))
            .chain((0..200).map(|t| Point::new(600 - t, 600)))
            .chain((0..200).map(|t| Point::new(400, 600 - t)))
            .collect();
        points.rotate_left(100);
        Contour::new(points)
    }

    // Tests a square corner scores the product of both radial drops
    // Verified by summing the drops instead of multiplying them
    #[test]
    fn test_corner_score() {
        let profile = RadialProfile::from_contour(&square());
        let scores = sharpness_scores(&profile, &[100, 300, 500, 700], 30);

        let drop = 100.0_f64.hypot(100.0) - 70.0_f64.hypot(100.0);
        assert_eq!(scores.len(), 4);
        for score in scores {
            assert!((score - drop * drop).abs() < 1e-9, "score {score}");
        }
    }

    // Tests a point whose radius rises on both sides scores zero
    // Verified by removing the clamp at zero
    #[test]
    fn test_rising_sides_score_zero() {
        let profile = RadialProfile::from_contour(&square());
        let scores = sharpness_scores(&profile, &[0, 100], 30);

        assert!(scores[0].abs() < f64::EPSILON);
        assert!(scores[1] > 0.0);
    }

    // Tests an offset landing on an equally far point gives no drop
    // Verified by measuring against the local radius only
    #[test]
    fn test_offset_to_opposite_corner() {
        let profile = RadialProfile::from_contour(&square());
        let scores = sharpness_scores(&profile, &[100, 300, 500, 700], 400);

        assert!(scores.iter().all(|s| s.abs() < 1e-9));
    }

    // Tests no peaks yield no scores
    // Verified by returning a score for the maximum radius
    #[test]
    fn test_no_peaks() {
        let profile = RadialProfile::from_contour(&square());
        assert!(sharpness_scores(&profile, &[], 30).is_empty());
    }
}
