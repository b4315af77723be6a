//! Mathematical utilities for radial profile analysis

/// Polar conversion and angular distances on the circle
pub mod angle;
/// Peak detection on sampled 1D signals
pub mod peaks;
