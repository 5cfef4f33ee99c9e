//! Growth & perturbation: the exogenous changes applied at the start of
//! every round.

use tracing::debug;

use hm_agent::{Market, Placement, Preferences};
use hm_core::{ModelConfig, NeighbourhoodId, SimRng};

/// Add `floor(population × population_growth_rate) − population` homeless
/// newcomers.  Returns the number added.
///
/// Newcomers draw a fresh salary and preferences and start with
/// `newcomer_cash_multiplier × salary` in cash.
pub fn grow_population(market: &mut Market, config: &ModelConfig, rng: &mut SimRng) -> u32 {
    let population = market.population();
    let target = (population as f64 * config.population_growth_rate).floor() as usize;
    let newcomers = target.saturating_sub(population);

    for _ in 0..newcomers {
        let salary = rng.log_normal(config.salary_log_mean, config.salary_log_sigma);
        let prefs = Preferences::sample(rng);
        market.add_resident(prefs, salary, config.newcomer_cash_multiplier * salary);
    }
    if newcomers > 0 {
        debug!(newcomers, population = market.population(), "population grew");
    }
    newcomers as u32
}

/// Raise every neighbourhood's capacity to `floor(capacity × rate)` and build
/// vacant units for the shortfall.  Returns the number of units built.
///
/// New units are priced at the neighbourhood's current average price and
/// placed with `placement`, which draws only from `placement_rng`.
pub fn grow_housing(
    market:        &mut Market,
    config:        &ModelConfig,
    placement:     &dyn Placement,
    placement_rng: &mut SimRng,
) -> u32 {
    let mut built = 0u32;
    for i in 0..market.neighbourhoods.len() {
        let nid = NeighbourhoodId(i as u16);
        let nbhd = market.neighbourhood_mut(nid);
        nbhd.capacity = (nbhd.capacity as f64 * config.housing_growth_rate).floor() as u32;
        let shortfall = (nbhd.capacity as usize).saturating_sub(nbhd.units.len());
        let price = nbhd.new_unit_price();

        for _ in 0..shortfall {
            let location = placement.random_point(market.neighbourhood(nid), placement_rng);
            market.add_dwelling(nid, price, location);
        }
        built += shortfall as u32;
    }
    if built > 0 {
        debug!(built, units = market.unit_count(), "housing stock grew");
    }
    built
}

/// Shift every quality index of every neighbourhood by independent uniform
/// noise in `[−noise, +noise]`, clamped at zero.  No-op when `noise == 0`.
pub fn perturb_quality(market: &mut Market, noise: f64, rng: &mut SimRng) {
    if noise <= 0.0 {
        return;
    }
    for nbhd in &mut market.neighbourhoods {
        nbhd.quality.map_in_place(|q| (q + rng.symmetric_noise(noise)).max(0.0));
    }
}
