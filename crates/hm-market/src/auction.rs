//! Bilateral auction between housed seekers.
//!
//! # Algorithm
//!
//! ```text
//! shuffle seekers
//! for s1 in seekers (skipping anyone already matched this round):
//!     pool ← up to `candidate_pool` unmatched seekers other than s1
//!     for s2 in pool:
//!         n1 ← s1's contentment in s2's dwelling,  n2 ← s2's in s1's
//!         keep only if n1 > c1 and n2 > c2
//!         p1' ← (1 + n2 − c2)² · p1        p2' ← (1 + n1 − c1)² · p2
//!         keep only if cash1 + p1' > p2' and cash2 + p2' > p1'
//!     take the survivor with the highest mean gain (first one on ties)
//!     execute the swap; s1 and s2 leave the pool
//! ```
//!
//! The bounded pool models imperfect search.  Unmatched seekers live in a
//! dense vector with a position index, so drawing a pool and retiring a
//! matched pair do not depend on how many seekers there are.  A round stays
//! linear in the number of seekers, with at most `candidate_pool`
//! evaluations each.

use rustc_hash::FxHashMap;
use tracing::debug;

use hm_agent::Market;
use hm_core::{ModelConfig, ResidentId, SimRng};

use crate::transaction::{SwapTerms, execute_swap};

/// Result of one auction pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuctionOutcome {
    /// Housed seekers that entered the auction.
    pub participants: usize,
    /// Executed swaps, in execution order.
    pub swaps:        Vec<SwapTerms>,
}

impl AuctionOutcome {
    #[inline]
    pub fn deals(&self) -> usize {
        self.swaps.len()
    }
}

/// Run one auction pass over the market's housed seekers.
pub fn run_auction(market: &mut Market, config: &ModelConfig, rng: &mut SimRng) -> AuctionOutcome {
    let mut seekers = market.housed_seekers();
    rng.shuffle(&mut seekers);

    let mut outcome = AuctionOutcome { participants: seekers.len(), swaps: Vec::new() };
    let mut unmatched = Unmatched::new(&seekers);

    for &s1 in &seekers {
        if !unmatched.contains(s1) {
            continue;
        }

        // One extra draw covers the case where s1 samples itself.
        let pool: Vec<ResidentId> = rng
            .sample_indices(unmatched.len(), config.candidate_pool.saturating_add(1))
            .into_iter()
            .map(|i| unmatched.members[i])
            .filter(|&r| r != s1)
            .take(config.candidate_pool)
            .collect();

        let Some(terms) = best_offer(market, s1, &pool) else {
            continue;
        };

        execute_swap(market, &terms);
        unmatched.remove(terms.a);
        unmatched.remove(terms.b);
        outcome.swaps.push(terms);
    }

    debug!(participants = outcome.participants, deals = outcome.deals(), "auction cleared");
    outcome
}

/// Seekers still available this round, with O(1) membership and removal.
struct Unmatched {
    members:  Vec<ResidentId>,
    position: FxHashMap<ResidentId, usize>,
}

impl Unmatched {
    fn new(seekers: &[ResidentId]) -> Self {
        let position = seekers.iter().enumerate().map(|(i, &r)| (r, i)).collect();
        Self { members: seekers.to_vec(), position }
    }

    #[inline]
    fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    fn contains(&self, r: ResidentId) -> bool {
        self.position.contains_key(&r)
    }

    fn remove(&mut self, r: ResidentId) {
        let Some(i) = self.position.remove(&r) else {
            return;
        };
        self.members.swap_remove(i);
        if let Some(&moved) = self.members.get(i) {
            self.position.insert(moved, i);
        }
    }
}

/// Best acceptable counterparty for `s1` among `pool`, by mean gain.
///
/// Ties keep the first maximal candidate encountered.
pub fn best_offer(market: &Market, s1: ResidentId, pool: &[ResidentId]) -> Option<SwapTerms> {
    let mut best: Option<SwapTerms> = None;
    for &s2 in pool {
        let Some(terms) = offer(market, s1, s2) else {
            continue;
        };
        if best.is_none_or(|b| terms.joint_gain() > b.joint_gain()) {
            best = Some(terms);
        }
    }
    best
}

/// Terms on which `a` and `b` would swap, or `None` if either side does not
/// strictly gain or cannot afford the re-priced dwelling.
pub fn offer(market: &Market, a: ResidentId, b: ResidentId) -> Option<SwapTerms> {
    if a == b {
        return None;
    }
    let ra = market.resident(a);
    let rb = market.resident(b);
    let (da, db) = (ra.dwelling?, rb.dwelling?);

    let score_a = market.evaluate(a, db);
    let score_b = market.evaluate(b, da);
    let (before_a, before_b) = (ra.contentment, rb.contentment);
    if !(score_a > before_a && score_b > before_b) {
        return None;
    }

    // Each unit is re-priced by how much its incoming owner gains.
    let price_a = (1.0 + score_b - before_b).powi(2) * market.dwelling(da).price;
    let price_b = (1.0 + score_a - before_a).powi(2) * market.dwelling(db).price;
    if !(ra.cash + price_a > price_b && rb.cash + price_b > price_a) {
        return None;
    }

    Some(SwapTerms { a, b, price_a, price_b, score_a, score_b, before_a, before_b })
}
