//! Radial profile of a contour around its centroid

use crate::analysis::contour::Contour;
use crate::math::angle::to_polar;

/// Distance and angle from the centroid for every contour index
#[derive(Debug, Clone, PartialEq)]
pub struct RadialProfile {
    rho: Vec<f64>,
    phi: Vec<f64>,
}

impl RadialProfile {
    /// Compute the profile of a contour
    pub fn from_contour(contour: &Contour) -> Self {
        let (rho, phi) = contour
            .centered()
            .into_iter()
            .map(|(x, y)| to_polar(x, y))
            .unzip();
        Self { rho, phi }
    }

    /// Number of samples (equal to the contour length)
    pub const fn len(&self) -> usize {
        self.rho.len()
    }

    /// Whether the profile has no samples
    pub const fn is_empty(&self) -> bool {
        self.rho.is_empty()
    }

    /// Radius signal in contour order
    pub fn radii(&self) -> &[f64] {
        &self.rho
    }

    /// Radius at an exact index
    pub fn rho(&self, index: usize) -> Option<f64> {
        self.rho.get(index).copied()
    }

    /// Angle at an exact index
    pub fn phi(&self, index: usize) -> Option<f64> {
        self.phi.get(index).copied()
    }

    /// Radius at `index + offset`, wrapping around the contour
    pub fn rho_wrapped(&self, index: usize, offset: isize) -> Option<f64> {
        let len = isize::try_from(self.rho.len()).ok()?;
        if len == 0 {
            return None;
        }
        let base = isize::try_from(index).ok()?;
        let wrapped = usize::try_from((base + offset).rem_euclid(len)).ok()?;
        self.rho.get(wrapped).copied()
    }
}
