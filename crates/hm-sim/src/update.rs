//! Per-round financial and contentment update for every resident.

use tracing::debug;

use hm_agent::Market;
use hm_core::ResidentId;
use hm_market::force_sale;

/// Rounds of living expense a resident wants in reserve before their
/// contentment stops being penalised.
pub const CASH_BUFFER_ROUNDS: f64 = 3.0;

/// Pay salaries, charge expenses, and recompute contentment and seeking.
///
/// ```text
/// cash += salary − expense          (homeless residents pay no expense)
/// if cash < 0:  forced sale at half price, resident becomes homeless
/// else:         c = contentment in current dwelling
///               if cash < 3·expense:  c *= cash / (3·expense)
///               seeking = homeless or c < threshold
/// ```
///
/// Returns the number of forced sales.
pub fn update_residents(market: &mut Market, threshold: f64) -> u32 {
    let mut bankruptcies = 0u32;

    for i in 0..market.residents.len() {
        let id = ResidentId(i as u32);
        let expense = market.resident(id).neighbourhood.map_or(0.0, |n| market.neighbourhood(n).expense);

        let r = market.resident_mut(id);
        r.cash += r.salary - expense;

        if r.cash < 0.0 && !r.is_homeless() {
            force_sale(market, id);
            bankruptcies += 1;
            continue;
        }

        let mut contentment = market.current_contentment(id);
        let reserve = CASH_BUFFER_ROUNDS * expense;
        let r = market.resident_mut(id);
        if expense > 0.0 && r.cash < reserve {
            contentment *= (r.cash / reserve).max(0.0);
        }
        r.contentment = contentment;
        r.update_seeking(threshold);
    }

    if bankruptcies > 0 {
        debug!(bankruptcies, "forced sales");
    }
    bankruptcies
}
