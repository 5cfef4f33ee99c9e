//! Dwelling units.

use hm_core::{DwellingId, GeoPoint, NeighbourhoodId, ResidentId};

/// A housing asset.  Its neighbourhood never changes; its price changes only
/// through trades; its owner changes only through [`crate::Market`]'s
/// ownership primitives.
#[derive(Clone, Debug, PartialEq)]
pub struct Dwelling {
    pub id:            DwellingId,
    pub neighbourhood: NeighbourhoodId,
    pub price:         f64,
    pub owner:         Option<ResidentId>,
    /// Cosmetic placement inside the neighbourhood.
    pub location:      GeoPoint,
}

impl Dwelling {
    #[inline]
    pub fn is_vacant(&self) -> bool {
        self.owner.is_none()
    }
}
