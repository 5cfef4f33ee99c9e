//! The `Sim` struct and its round loop.

use tracing::{debug, info};

use hm_agent::{Market, Placement};
use hm_core::{Config, SimRng, StopCondition};
use hm_market::{allocate_vacancies, run_auction};

use crate::growth::{grow_housing, grow_population, perturb_quality};
use crate::update::update_residents;
use crate::{RoundStats, SimObserver};

/// RNG stream reserved for cosmetic placement, so coordinates never shift
/// the economic trajectory of a seed.
pub const PLACEMENT_STREAM: u64 = 0x706c_6163_6500;

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Each call to [`step`](Sim::step) advances one round through six
/// strictly sequential phases:
///
/// 1. **Growth**: newcomers arrive, housing stock grows, quality noise.
/// 2. **Auction**: housed seekers swap dwellings pairwise.
/// 3. **Vacancies**: vacant units go to remaining seekers.
/// 4. **Update**: salaries, expenses, bankruptcies, contentment, seeking.
/// 5. **Statistics**: neighbourhood aggregates and [`RoundStats`].
/// 6. **Stop condition**: quiescence bookkeeping.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Model and run configuration.  Immutable after construction.
    pub config: Config,

    pub market: Market,

    /// Drives every economic random decision.
    pub rng: SimRng,

    /// Feeds `placement` only.
    pub placement_rng: SimRng,

    pub placement: Box<dyn Placement>,

    /// Number of completed rounds.
    pub round: u64,

    /// Stop condition in force; `FixedRounds` when the configured condition
    /// cannot apply to this model.
    pub(crate) stop: StopCondition,

    /// Consecutive zero-deal rounds.
    pub(crate) quiet_rounds: u32,

    pub(crate) running: bool,

    pub(crate) last: Option<RoundStats>,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until `run.max_rounds` rounds have completed or the stop
    /// condition fires.  Returns the number of rounds executed by this call.
    ///
    /// Use [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> u64 {
        let start = self.round;
        info!(seed = self.config.run.seed, max_rounds = self.config.run.max_rounds, "run started");

        while self.running && self.round < self.config.run.max_rounds {
            self.round_with(observer);
        }
        observer.on_sim_end(self.round);

        info!(rounds = self.round, population = self.market.population(), "run finished");
        self.round - start
    }

    /// Run exactly `n` rounds, ignoring `max_rounds` and the stop condition.
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_rounds<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.round_with(observer);
        }
    }

    /// Advance one round.
    pub fn step(&mut self) -> RoundStats {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let model = &self.config.model;
        let market = &mut self.market;
        let rng = &mut self.rng;
        let round = self.round + 1;
        #[cfg(debug_assertions)]
        let units_before = market.unit_count();

        // ── Phase 1: growth & perturbation ────────────────────────────────
        let new_residents = grow_population(market, model, rng);
        let new_units = grow_housing(market, model, self.placement.as_ref(), &mut self.placement_rng);
        perturb_quality(market, model.noise, rng);

        // ── Phase 2–3: market clearing ────────────────────────────────────
        let auction = run_auction(market, model, rng);
        let vacancies = allocate_vacancies(market, rng);

        // ── Phase 4: per-agent update ─────────────────────────────────────
        let bankruptcies = update_residents(market, model.contentment_threshold);

        // ── Phase 5: statistics ───────────────────────────────────────────
        market.recompute_neighbourhood_stats();
        let swap_deals = auction.deals() as u32;
        let vacancy_deals = vacancies.deals() as u32;
        let stats = RoundStats {
            deals: swap_deals + vacancy_deals,
            swap_deals,
            vacancy_deals,
            bankruptcies,
            new_residents,
            new_units,
            ..RoundStats::observe(round, market, model.contentment_threshold)
        };

        #[cfg(debug_assertions)]
        {
            market.check_invariants();
            assert!(market.unit_count() >= units_before, "dwellings disappeared during round {round}");
        }

        debug!(
            round,
            deals = stats.deals,
            homeless = stats.homeless,
            seekers = stats.seekers,
            "round complete"
        );

        // ── Phase 6: stop condition ───────────────────────────────────────
        self.round = round;
        if let StopCondition::Quiescent { quiet_rounds } = self.stop {
            self.quiet_rounds = if stats.deals == 0 { self.quiet_rounds + 1 } else { 0 };
            if self.quiet_rounds >= quiet_rounds {
                info!(round, quiet_rounds, "market reached equilibrium");
                self.running = false;
            }
        }
        self.last = Some(stats);
        stats
    }

    /// `false` once the stop condition has fired.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The stop condition actually in force.
    #[inline]
    pub fn stop_condition(&self) -> StopCondition {
        self.stop
    }

    /// Statistics of the most recent round, if any round has run.
    #[inline]
    pub fn last_stats(&self) -> Option<&RoundStats> {
        self.last.as_ref()
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn round_with<O: SimObserver>(&mut self, observer: &mut O) {
        observer.on_round_start(self.round + 1);
        let stats = self.step();
        observer.on_round_end(&stats);

        let interval = self.config.run.output_interval;
        if interval > 0 && stats.round.is_multiple_of(interval) {
            observer.on_snapshot(stats.round, &self.market);
        }
    }
}
