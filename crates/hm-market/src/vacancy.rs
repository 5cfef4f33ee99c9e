//! Vacancy allocator: hands unclaimed dwellings to seeking residents.
//!
//! Vacant units and seekers are shuffled independently.  Each unit goes to
//! the first seeker, in that order, who accepts it:
//!
//! | Seeker   | Accepts when                                                   |
//! |----------|----------------------------------------------------------------|
//! | housed   | contentment there `>` current, and `cash + own price > price`  |
//! | homeless | `cash > price`                                                 |
//!
//! A unit nobody accepts stays vacant for the round.  A seeker moves at most
//! once per pass.

use tracing::debug;

use hm_agent::Market;
use hm_core::{DwellingId, ResidentId, SimRng};

use crate::transaction::{VacancyMove, move_into};

/// Result of one allocation pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VacancyOutcome {
    /// Vacant units offered this pass.
    pub offered: usize,
    pub moves:   Vec<VacancyMove>,
}

impl VacancyOutcome {
    #[inline]
    pub fn deals(&self) -> usize {
        self.moves.len()
    }
}

/// Offer every vacant dwelling to the market's current seekers.
pub fn allocate_vacancies(market: &mut Market, rng: &mut SimRng) -> VacancyOutcome {
    let mut vacant = market.vacant_dwellings();
    let mut seekers = market.seekers();
    rng.shuffle(&mut vacant);
    rng.shuffle(&mut seekers);

    let mut outcome = VacancyOutcome { offered: vacant.len(), moves: Vec::new() };

    for dwelling in vacant {
        if seekers.is_empty() {
            break;
        }
        let Some((pos, score)) = seekers
            .iter()
            .enumerate()
            .find_map(|(i, &s)| accepts(market, s, dwelling).map(|score| (i, score)))
        else {
            continue;
        };
        let resident = seekers.remove(pos);
        outcome.moves.push(move_into(market, resident, dwelling, score));
    }

    debug!(offered = outcome.offered, filled = outcome.deals(), "vacancies allocated");
    outcome
}

/// Contentment `resident` expects in `dwelling` if they would take it,
/// otherwise `None`.
pub fn accepts(market: &Market, resident: ResidentId, dwelling: DwellingId) -> Option<f64> {
    let r = market.resident(resident);
    let price = market.dwelling(dwelling).price;
    match r.dwelling {
        Some(own) => {
            let score = market.evaluate(resident, dwelling);
            let affordable = r.cash + market.dwelling(own).price > price;
            (score > r.contentment && affordable).then_some(score)
        }
        None => (r.cash > price).then(|| market.evaluate(resident, dwelling)),
    }
}
