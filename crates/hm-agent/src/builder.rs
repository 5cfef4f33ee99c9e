//! Fluent builder for the initial [`Market`].
//!
//! # Setup rules
//!
//! For each neighbourhood record:
//!
//! 1. `units = floor(capacity × housing_fraction)`, at least 1 when the
//!    record has any capacity.  Units are priced at `base_price`.
//! 2. The first `round(units × initial_occupancy)` units get a native owner:
//!    log-normal salary, flat-Dirichlet preferences, cash
//!    `native_cash_multiplier × salary`.
//!
//! Afterwards the wealth reference is fixed (mean native salary, mean
//! `base_price` over records), every resident's contentment is computed and
//! neighbourhood aggregates are initialised.

use tracing::{debug, warn};

use hm_core::{HmError, HmResult, ModelConfig, NeighbourhoodId, SimRng};

use crate::{
    Market, Neighbourhood, NeighbourhoodRecord, NullPlacement, Placement, Preferences, UtilityModel,
    WealthReference,
};

/// Builds a populated [`Market`] from neighbourhood records.
///
/// # Example
///
/// ```rust,ignore
/// let market = MarketBuilder::new(&records, &config.model)
///     .placement(&JitterPlacement { half_width: 0.01 })
///     .build(&mut rng, &mut placement_rng)?;
/// ```
pub struct MarketBuilder<'a> {
    records:   &'a [NeighbourhoodRecord],
    config:    &'a ModelConfig,
    placement: &'a dyn Placement,
}

impl<'a> MarketBuilder<'a> {
    pub fn new(records: &'a [NeighbourhoodRecord], config: &'a ModelConfig) -> Self {
        Self { records, config, placement: &NullPlacement }
    }

    /// Supply the placement source used for dwelling coordinates.
    pub fn placement(mut self, placement: &'a dyn Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Validate inputs and build the market.
    ///
    /// `rng` drives the economics (salaries, preferences); `placement_rng` only
    /// feeds the placement source, so cosmetic choices never shift the
    /// economic trajectory of a seed.
    pub fn build(self, rng: &mut SimRng, placement_rng: &mut SimRng) -> HmResult<Market> {
        let cfg = self.config;
        cfg.validate()?;
        if self.records.is_empty() {
            return Err(HmError::Config("at least one neighbourhood is required".into()));
        }
        if self.records.len() > u16::MAX as usize {
            return Err(HmError::Config(format!("too many neighbourhoods: {}", self.records.len())));
        }

        let neighbourhoods: Vec<Neighbourhood> = self
            .records
            .iter()
            .enumerate()
            .map(|(i, rec)| Neighbourhood::from_record(NeighbourhoodId(i as u16), rec))
            .collect();

        let mean_price = self.records.iter().map(|r| r.base_price).sum::<f64>() / self.records.len() as f64;
        // Salary reference is patched in once the natives exist.
        let mut market = Market::new(
            neighbourhoods,
            UtilityModel::new(cfg.materialism, WealthReference::new(0.0, cfg.native_cash_multiplier, mean_price)),
        );

        for (i, rec) in self.records.iter().enumerate() {
            let nid = NeighbourhoodId(i as u16);
            let units = initial_units(rec.capacity, cfg.housing_fraction);
            if units == 0 {
                warn!(neighbourhood = %rec.name, "no capacity; neighbourhood starts empty");
            }
            market.neighbourhood_mut(nid).capacity = units;

            let owned = ((units as f64) * cfg.initial_occupancy).round() as u32;
            for u in 0..units {
                let location = self.placement.random_point(market.neighbourhood(nid), placement_rng);
                let dwelling = market.add_dwelling(nid, rec.base_price, location);
                if u < owned {
                    let salary = rng.log_normal(cfg.salary_log_mean, cfg.salary_log_sigma);
                    let prefs = Preferences::sample(rng);
                    let resident = market.add_resident(prefs, salary, cfg.native_cash_multiplier * salary);
                    market.occupy(resident, dwelling);
                }
            }
        }

        let mean_salary = if market.residents.is_empty() {
            // Nobody to average over: fall back to the distribution mean.
            (cfg.salary_log_mean + cfg.salary_log_sigma.powi(2) / 2.0).exp()
        } else {
            market.residents.iter().map(|r| r.salary).sum::<f64>() / market.residents.len() as f64
        };
        market.utility.reference = WealthReference::new(mean_salary, cfg.native_cash_multiplier, mean_price);

        for i in 0..market.residents.len() {
            market.refresh(market.residents[i].id, cfg.contentment_threshold);
        }
        market.recompute_neighbourhood_stats();

        debug!(
            neighbourhoods = market.neighbourhoods.len(),
            residents = market.population(),
            units = market.unit_count(),
            mean_salary,
            mean_price,
            "market initialised"
        );
        Ok(market)
    }
}

/// Scaled unit count for a neighbourhood.
fn initial_units(capacity: f64, housing_fraction: f64) -> u32 {
    if capacity <= 0.0 {
        return 0;
    }
    ((capacity * housing_fraction).floor() as u32).max(1)
}
