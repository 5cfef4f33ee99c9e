//! Plain data row types written by output backends.

use serde::Serialize;

use hm_agent::Neighbourhood;
use hm_sim::RoundStats;

/// City-wide summary of one round.  Column order matches
/// [`RoundSummaryRow::HEADERS`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoundSummaryRow {
    pub round:           u64,
    pub deals:           u32,
    pub swap_deals:      u32,
    pub vacancy_deals:   u32,
    pub bankruptcies:    u32,
    pub new_residents:   u32,
    pub new_units:       u32,
    pub population:      u32,
    pub homeless:        u32,
    pub seekers:         u32,
    pub unhappy_share:   f64,
    pub total_units:     u32,
    pub avg_contentment: f64,
    pub avg_price:       f64,
    pub avg_cash:        f64,
}

impl RoundSummaryRow {
    pub const HEADERS: [&'static str; 15] = [
        "round",
        "deals",
        "swap_deals",
        "vacancy_deals",
        "bankruptcies",
        "new_residents",
        "new_units",
        "population",
        "homeless",
        "seekers",
        "unhappy_share",
        "total_units",
        "avg_contentment",
        "avg_price",
        "avg_cash",
    ];
}

impl From<&RoundStats> for RoundSummaryRow {
    fn from(s: &RoundStats) -> Self {
        Self {
            round:           s.round,
            deals:           s.deals,
            swap_deals:      s.swap_deals,
            vacancy_deals:   s.vacancy_deals,
            bankruptcies:    s.bankruptcies,
            new_residents:   s.new_residents,
            new_units:       s.new_units,
            population:      s.population,
            homeless:        s.homeless,
            seekers:         s.seekers,
            unhappy_share:   s.unhappy_share,
            total_units:     s.total_units,
            avg_contentment: s.avg_contentment,
            avg_price:       s.avg_price,
            avg_cash:        s.avg_cash,
        }
    }
}

/// One neighbourhood's aggregates at a snapshot round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeighbourhoodRow {
    pub round:           u64,
    pub neighbourhood:   String,
    pub capacity:        u32,
    pub occupied:        u32,
    pub vacant:          u32,
    /// Cumulative since the start of the run.
    pub moves_in:        u64,
    /// Cumulative since the start of the run.
    pub moves_out:       u64,
    pub avg_contentment: f64,
    pub avg_salary:      f64,
    pub avg_cash:        f64,
    pub avg_price:       f64,
}

impl NeighbourhoodRow {
    pub const HEADERS: [&'static str; 11] = [
        "round",
        "neighbourhood",
        "capacity",
        "occupied",
        "vacant",
        "moves_in",
        "moves_out",
        "avg_contentment",
        "avg_salary",
        "avg_cash",
        "avg_price",
    ];

    pub fn new(round: u64, n: &Neighbourhood) -> Self {
        Self {
            round,
            neighbourhood:   n.name.clone(),
            capacity:        n.capacity,
            occupied:        n.stats.occupied,
            vacant:          n.stats.vacant,
            moves_in:        n.moves_in,
            moves_out:       n.moves_out,
            avg_contentment: n.stats.avg_contentment,
            avg_salary:      n.stats.avg_salary,
            avg_cash:        n.stats.avg_cash,
            avg_price:       n.stats.avg_price,
        }
    }
}
