//! Placement coordinates.
//!
//! Coordinates are purely cosmetic: they are handed to visualisation and
//! export code and never read by the economic logic.  Units are whatever the
//! external geometry provider uses (projected metres, degrees, ...).

use serde::{Deserialize, Serialize};

/// A 2-D point inside a neighbourhood's boundary.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub x: f64,
    pub y: f64,
}

impl GeoPoint {
    pub const ORIGIN: GeoPoint = GeoPoint { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset by `(dx, dy)`.
    #[inline]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.x, self.y)
    }
}
