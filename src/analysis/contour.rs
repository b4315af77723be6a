//! Piece boundary contours as produced by segmentation

use serde::{Deserialize, Serialize};

/// Integer pixel coordinate on a piece boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal pixel coordinate
    pub x: i32,
    /// Vertical pixel coordinate
    pub y: i32,
}

impl Point {
    /// Create a point
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<[i32; 2]> for Point {
    fn from([x, y]: [i32; 2]) -> Self {
        Self { x, y }
    }
}

/// Ordered, cyclic boundary polygon of one piece
///
/// Index `len - 1` is adjacent to index `0`. Traversal direction is whatever
/// segmentation produced, but it must be consistent across pieces.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Contour {
    points: Vec<Point>,
}

impl Contour {
    /// Wrap an ordered point sequence
    pub const fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Number of boundary points
    pub const fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the contour has no points
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Boundary points in traversal order
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Arithmetic mean of all points, `None` for an empty contour
    pub fn centroid(&self) -> Option<(f64, f64)> {
        if self.points.is_empty() {
            return None;
        }
        let (sx, sy) = self
            .points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + f64::from(p.x), sy + f64::from(p.y)));
        let n = self.points.len() as f64;
        Some((sx / n, sy / n))
    }

    /// Points shifted so the centroid sits at the origin
    pub fn centered(&self) -> Vec<(f64, f64)> {
        let Some((cx, cy)) = self.centroid() else {
            return Vec::new();
        };
        self.points
            .iter()
            .map(|p| (f64::from(p.x) - cx, f64::from(p.y) - cy))
            .collect()
    }
}

impl From<Vec<Point>> for Contour {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<Point> for Contour {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
