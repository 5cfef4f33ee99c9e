//! Neighbourhoods: fixed quality attributes plus derived aggregates.

use serde::{Deserialize, Serialize};

use hm_core::{DwellingId, GeoPoint, NeighbourhoodId};

// ── QualityIndex ──────────────────────────────────────────────────────────────

/// The four neighbourhood indices residents have preferences over.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityIndex {
    pub housing: f64,
    pub shops:   f64,
    pub crime:   f64,
    pub nature:  f64,
}

impl QualityIndex {
    pub fn new(housing: f64, shops: f64, crime: f64, nature: f64) -> Self {
        Self { housing, shops, crime, nature }
    }

    /// Indices in preference-weight order: housing, shops, crime, nature.
    #[inline]
    pub fn as_array(&self) -> [f64; 4] {
        [self.housing, self.shops, self.crime, self.nature]
    }

    /// Apply `f` to every index in place.
    pub fn map_in_place(&mut self, mut f: impl FnMut(f64) -> f64) {
        self.housing = f(self.housing);
        self.shops   = f(self.shops);
        self.crime   = f(self.crime);
        self.nature  = f(self.nature);
    }
}

// ── NeighbourhoodRecord ───────────────────────────────────────────────────────

/// One row of the externally supplied neighbourhood table.
///
/// `x`/`y` are an optional centroid used only for placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NeighbourhoodRecord {
    pub name:            String,
    pub housing_quality: f64,
    pub shops:           f64,
    pub crime:           f64,
    pub nature:          f64,
    /// Living expense per round.
    pub expense:         f64,
    /// Real-world dwelling count; scaled by `ModelConfig::housing_fraction`.
    pub capacity:        f64,
    pub base_price:      f64,
    #[serde(default)]
    pub x:               Option<f64>,
    #[serde(default)]
    pub y:               Option<f64>,
}

impl NeighbourhoodRecord {
    pub fn quality(&self) -> QualityIndex {
        QualityIndex::new(self.housing_quality, self.shops, self.crime, self.nature)
    }

    pub fn centroid(&self) -> GeoPoint {
        GeoPoint::new(self.x.unwrap_or(0.0), self.y.unwrap_or(0.0))
    }
}

// ── NeighbourhoodStats ────────────────────────────────────────────────────────

/// Aggregates recomputed from scratch every round; never mutated otherwise.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct NeighbourhoodStats {
    /// Units with an owner.
    pub occupied:        u32,
    /// Units without an owner.
    pub vacant:          u32,
    pub avg_contentment: f64,
    pub avg_salary:      f64,
    pub avg_cash:        f64,
    /// Mean price over all units, vacant included.
    pub avg_price:       f64,
}

// ── Neighbourhood ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Neighbourhood {
    pub id:         NeighbourhoodId,
    pub name:       String,
    pub quality:    QualityIndex,
    pub expense:    f64,
    pub base_price: f64,
    pub centroid:   GeoPoint,

    /// Target unit count.  Equals `units.len()` once the round's housing
    /// growth has been applied.
    pub capacity:   u32,

    /// Every unit ever built here, in creation order.
    pub units:      Vec<DwellingId>,

    /// Cumulative arrivals over the run.
    pub moves_in:   u64,
    /// Cumulative departures over the run.
    pub moves_out:  u64,

    pub stats:      NeighbourhoodStats,
}

impl Neighbourhood {
    /// Create an empty neighbourhood (no units yet) from a table row.
    pub fn from_record(id: NeighbourhoodId, record: &NeighbourhoodRecord) -> Self {
        Self {
            id,
            name:       record.name.clone(),
            quality:    record.quality(),
            expense:    record.expense,
            base_price: record.base_price,
            centroid:   record.centroid(),
            capacity:   0,
            units:      Vec::new(),
            moves_in:   0,
            moves_out:  0,
            stats:      NeighbourhoodStats { avg_price: record.base_price, ..Default::default() },
        }
    }

    /// Total relocations touching this neighbourhood (arrivals + departures).
    #[inline]
    pub fn moves(&self) -> u64 {
        self.moves_in + self.moves_out
    }

    /// Price for newly built units: the current average, or the baseline if
    /// the neighbourhood has no priced units yet.
    pub fn new_unit_price(&self) -> f64 {
        if self.stats.avg_price > 0.0 {
            self.stats.avg_price
        } else {
            self.base_price
        }
    }
}
