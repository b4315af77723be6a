//! Tests for the radial profile around the contour centroid

#[cfg(test)]
mod tests {
    use jigsolve::analysis::contour::{Contour, Point};
    use jigsolve::analysis::profile::RadialProfile;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn cross() -> Contour {
        Contour::new(vec![
            Point::new(7, 5),
            Point::new(5, 8),
            Point::new(3, 5),
            Point::new(5, 2),
        ])
    }

    // Tests radii and angles are measured from the centroid
    // Verified by measuring from the image origin
    #[test]
    fn test_profile_of_cross() {
        let profile = RadialProfile::from_contour(&cross());

        assert_eq!(profile.len(), 4);
        let radii = profile.radii();
        assert!((radii[0] - 2.0).abs() < 1e-12);
        assert!((radii[1] - 3.0).abs() < 1e-12);
        assert!((radii[2] - 2.0).abs() < 1e-12);
        assert!((radii[3] - 3.0).abs() < 1e-12);

        assert!(profile.phi(0).unwrap().abs() < 1e-12);
        assert!((profile.phi(1).unwrap() - FRAC_PI_2).abs() < 1e-12);
        assert!((profile.phi(2).unwrap() - PI).abs() < 1e-12);
        assert!((profile.phi(3).unwrap() + FRAC_PI_2).abs() < 1e-12);
    }

    // Tests offsets wrap around the contour in both directions
    // Verified by using truncating remainder instead of Euclidean remainder
    #[test]
    fn test_rho_wrapped() {
        let profile = RadialProfile::from_contour(&cross());

        assert_eq!(profile.rho_wrapped(0, -1), profile.rho(3));
        assert_eq!(profile.rho_wrapped(3, 2), profile.rho(1));
        assert_eq!(profile.rho_wrapped(1, -9), profile.rho(0));
        assert_eq!(profile.rho(4), None);
    }

    // Tests an empty contour yields an empty profile
    // Verified by seeding the profile with a zero sample
    #[test]
    fn test_empty_profile() {
        let profile = RadialProfile::from_contour(&Contour::default());
        assert!(profile.is_empty());
        assert_eq!(profile.rho_wrapped(0, 1), None);
    }
}
