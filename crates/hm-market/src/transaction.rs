//! Ownership-changing transactions.
//!
//! Every function here updates cash, prices, ownership links and move
//! counters together, so no caller can observe a half-finished move.

use hm_agent::Market;
use hm_core::{DwellingId, ResidentId};

// ── Swap ──────────────────────────────────────────────────────────────────────

/// Agreed terms of a bilateral swap between `a` and `b`.
///
/// `price_a` is the new price of `a`'s current dwelling, `score_a` the
/// contentment `a` expects in `b`'s dwelling, `before_a` the contentment `a`
/// had when the terms were struck.  Symmetric for `b`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SwapTerms {
    pub a:        ResidentId,
    pub b:        ResidentId,
    pub price_a:  f64,
    pub price_b:  f64,
    pub score_a:  f64,
    pub score_b:  f64,
    pub before_a: f64,
    pub before_b: f64,
}

impl SwapTerms {
    /// Mean contentment gain of the two parties.
    #[inline]
    pub fn joint_gain(&self) -> f64 {
        ((self.score_a - self.before_a) + (self.score_b - self.before_b)) / 2.0
    }
}

/// Execute a swap: re-price both dwellings, settle the price difference,
/// exchange ownership, and count one move out of and one move into each
/// side's neighbourhood.
///
/// Both parties leave with `seeking = false` and the contentment they were
/// promised; the next per-round update recomputes it.
pub fn execute_swap(market: &mut Market, terms: &SwapTerms) {
    let da = market.resident(terms.a).dwelling.unwrap_or_else(|| panic!("{} is homeless", terms.a));
    let db = market.resident(terms.b).dwelling.unwrap_or_else(|| panic!("{} is homeless", terms.b));

    market.dwelling_mut(da).price = terms.price_a;
    market.dwelling_mut(db).price = terms.price_b;

    // a sells da for price_a and buys db for price_b; b does the reverse.
    market.resident_mut(terms.a).cash += terms.price_a - terms.price_b;
    market.resident_mut(terms.b).cash += terms.price_b - terms.price_a;

    market.exchange(terms.a, terms.b);

    for (resident, score) in [(terms.a, terms.score_a), (terms.b, terms.score_b)] {
        let r = market.resident_mut(resident);
        r.contentment = score;
        r.seeking = false;
    }

    let na = market.dwelling(da).neighbourhood;
    let nb = market.dwelling(db).neighbourhood;
    for n in [na, nb] {
        let nbhd = market.neighbourhood_mut(n);
        nbhd.moves_out += 1;
        nbhd.moves_in += 1;
    }
}

// ── Vacancy move ──────────────────────────────────────────────────────────────

/// Record of one resident moving into a vacant dwelling.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VacancyMove {
    pub resident: ResidentId,
    pub from:     Option<DwellingId>,
    pub to:       DwellingId,
    pub price:    f64,
    pub score:    f64,
}

/// Move `resident` into the vacant `dwelling` at its current price.
///
/// A housed mover sells their old unit at its current price (it becomes
/// vacant) and pays the difference; a homeless mover pays in full.  The
/// mover ends with `contentment = score` and `seeking = false`.
pub fn move_into(market: &mut Market, resident: ResidentId, dwelling: DwellingId, score: f64) -> VacancyMove {
    let price = market.dwelling(dwelling).price;
    let from = market.resident(resident).dwelling;

    match from {
        Some(old) => {
            let old_price = market.dwelling(old).price;
            market.resident_mut(resident).cash += old_price - price;
            market.vacate(old);
            let old_nbhd = market.dwelling(old).neighbourhood;
            market.neighbourhood_mut(old_nbhd).moves_out += 1;
        }
        None => market.resident_mut(resident).cash -= price,
    }

    market.occupy(resident, dwelling);
    let new_nbhd = market.dwelling(dwelling).neighbourhood;
    market.neighbourhood_mut(new_nbhd).moves_in += 1;

    let r = market.resident_mut(resident);
    r.contentment = score;
    r.seeking = false;

    VacancyMove { resident, from, to: dwelling, price, score }
}

// ── Forced sale ───────────────────────────────────────────────────────────────

/// Bankruptcy: sell the resident's dwelling at half its current price.
///
/// The dwelling is re-priced to the sale price and left vacant; the resident
/// becomes homeless with zero contentment and is seeking.  Returns the sale
/// proceeds, or `None` if the resident owned nothing to sell.
pub fn force_sale(market: &mut Market, resident: ResidentId) -> Option<f64> {
    let dwelling = market.resident(resident).dwelling?;
    let proceeds = market.dwelling(dwelling).price / 2.0;
    market.dwelling_mut(dwelling).price = proceeds;
    market.vacate(dwelling);

    let nbhd = market.dwelling(dwelling).neighbourhood;
    market.neighbourhood_mut(nbhd).moves_out += 1;

    let r = market.resident_mut(resident);
    r.cash += proceeds;
    r.contentment = 0.0;
    r.seeking = true;
    Some(proceeds)
}
