//! Residents and their preference weights.

use hm_core::{DwellingId, GeoPoint, NeighbourhoodId, ResidentId, SimRng};

/// Preference weights, drawn once at creation.
///
/// `neighbourhood` weights the quality indices (housing, shops, crime,
/// nature) and sums to 1.  `cash + salary + house` also sums to 1.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Preferences {
    pub neighbourhood: [f64; 4],
    pub cash:          f64,
    pub salary:        f64,
    pub house:         f64,
}

impl Preferences {
    /// Two independent flat Dirichlet draws.
    pub fn sample(rng: &mut SimRng) -> Self {
        let neighbourhood = rng.dirichlet_flat::<4>();
        let [cash, salary, house] = rng.dirichlet_flat::<3>();
        Self { neighbourhood, cash, salary, house }
    }

    /// Equal weights everywhere.
    pub fn uniform() -> Self {
        Self {
            neighbourhood: [0.25; 4],
            cash:          1.0 / 3.0,
            salary:        1.0 / 3.0,
            house:         1.0 / 3.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Resident {
    pub id:            ResidentId,
    pub prefs:         Preferences,
    /// Income per round, fixed for life.
    pub salary:        f64,
    /// May go transiently negative, which triggers a forced sale.
    pub cash:          f64,
    pub dwelling:      Option<DwellingId>,
    /// Mirrors the dwelling's neighbourhood; `None` while homeless.
    pub neighbourhood: Option<NeighbourhoodId>,
    pub contentment:   f64,
    pub seeking:       bool,
    pub location:      GeoPoint,
}

impl Resident {
    #[inline]
    pub fn is_homeless(&self) -> bool {
        self.dwelling.is_none()
    }

    /// Re-derive `seeking` from the current contentment.  Homeless residents
    /// always seek.
    #[inline]
    pub fn update_seeking(&mut self, threshold: f64) {
        self.seeking = self.is_homeless() || self.contentment < threshold;
    }
}
