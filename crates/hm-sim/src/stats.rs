//! City-wide per-round statistics.

use serde::Serialize;

use hm_agent::Market;

/// Summary of one completed round.
///
/// Counters (`deals` … `new_units`) describe what happened during the round;
/// the remaining fields describe the market state at its end.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct RoundStats {
    /// 1-based round number.
    pub round:           u64,
    /// Swaps plus vacancy moves.
    pub deals:           u32,
    pub swap_deals:      u32,
    pub vacancy_deals:   u32,
    pub bankruptcies:    u32,
    pub new_residents:   u32,
    pub new_units:       u32,

    pub population:      u32,
    pub homeless:        u32,
    pub seekers:         u32,
    /// Share of the population with contentment below the threshold.
    pub unhappy_share:   f64,
    pub total_units:     u32,
    /// Mean over all residents; homeless residents count as 0.
    pub avg_contentment: f64,
    /// Mean over all units, vacant included.
    pub avg_price:       f64,
    /// Mean over all residents.
    pub avg_cash:        f64,
}

impl RoundStats {
    /// Fill the state fields from `market`; counters are left at zero.
    pub fn observe(round: u64, market: &Market, threshold: f64) -> Self {
        let population = market.population();
        let mean = |sum: f64, n: usize| if n > 0 { sum / n as f64 } else { 0.0 };

        let (mut contentment, mut cash, mut seekers, mut unhappy) = (0.0, 0.0, 0u32, 0u32);
        for r in &market.residents {
            contentment += r.contentment;
            cash += r.cash;
            seekers += r.seeking as u32;
            unhappy += (r.contentment < threshold) as u32;
        }
        let price: f64 = market.dwellings.iter().map(|d| d.price).sum();

        Self {
            round,
            population:      population as u32,
            homeless:        market.homeless_count() as u32,
            seekers,
            unhappy_share:   mean(unhappy as f64, population),
            total_units:     market.unit_count() as u32,
            avg_contentment: mean(contentment, population),
            avg_price:       mean(price, market.unit_count()),
            avg_cash:        mean(cash, population),
            ..Self::default()
        }
    }
}
