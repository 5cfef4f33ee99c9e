//! Simulation observer trait for progress reporting and data collection.

use hm_agent::Market;

use crate::RoundStats;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// round loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl SimObserver for ProgressPrinter {
///     fn on_round_end(&mut self, stats: &RoundStats) {
///         println!("round {}: {} deals", stats.round, stats.deals);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before any processing of `round`.
    fn on_round_start(&mut self, _round: u64) {}

    /// Called once the round's statistics are final.
    fn on_round_end(&mut self, _stats: &RoundStats) {}

    /// Called every `run.output_interval` rounds, after `on_round_end`.
    ///
    /// Gives read-only access to the whole market so writers can record
    /// per-neighbourhood aggregates without the sim knowing any format.
    fn on_snapshot(&mut self, _round: u64, _market: &Market) {}

    /// Called once after the last round.
    fn on_sim_end(&mut self, _final_round: u64) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
