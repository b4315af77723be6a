//! Contour geometry and corner detection

/// Piece boundary contour representation
pub mod contour;
/// Four-corner detection from radial peaks
pub mod corners;
/// Radial profile around the contour centroid
pub mod profile;
/// Sharpness scoring of radial peaks
pub mod sharpness;
