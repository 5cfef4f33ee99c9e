//! Cosmetic placement of dwellings inside neighbourhood boundaries.
//!
//! The real polygon geometry belongs to the caller; the simulation only asks
//! for "a point somewhere in this neighbourhood" whenever it builds a unit.

use hm_core::{GeoPoint, SimRng};

use crate::Neighbourhood;

/// Source of placement coordinates.  Never consulted by economic logic.
pub trait Placement: Send + Sync {
    fn random_point(&self, neighbourhood: &Neighbourhood, rng: &mut SimRng) -> GeoPoint;
}

/// Places everything at the neighbourhood centroid.  Consumes no randomness.
pub struct NullPlacement;

impl Placement for NullPlacement {
    fn random_point(&self, neighbourhood: &Neighbourhood, _rng: &mut SimRng) -> GeoPoint {
        neighbourhood.centroid
    }
}

/// Uniform point in a square of half-width `half_width` around the centroid.
pub struct JitterPlacement {
    pub half_width: f64,
}

impl Placement for JitterPlacement {
    fn random_point(&self, neighbourhood: &Neighbourhood, rng: &mut SimRng) -> GeoPoint {
        let dx = rng.symmetric_noise(self.half_width);
        let dy = rng.symmetric_noise(self.half_width);
        neighbourhood.centroid.offset(dx, dy)
    }
}
