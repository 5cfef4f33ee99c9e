//! Independent runs over a list of seeds.
//!
//! Every member owns its market and RNGs, so members never share mutable
//! state.  With the `parallel` feature they run on Rayon's thread pool;
//! results come back in seed order either way.

use serde::Serialize;
use tracing::info;

use hm_agent::NeighbourhoodRecord;
use hm_core::Config;

use crate::{NoopObserver, RoundStats, SimBuilder, SimResult};

/// Outcome of one batch member.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BatchRun {
    pub seed:        u64,
    pub rounds:      u64,
    /// `None` only when the run was configured for zero rounds.
    pub final_stats: Option<RoundStats>,
}

/// Run one simulation per seed with `base` otherwise unchanged.
///
/// Fails on the first member that cannot be built.
pub fn run_batch(records: &[NeighbourhoodRecord], base: &Config, seeds: &[u64]) -> SimResult<Vec<BatchRun>> {
    info!(members = seeds.len(), "batch started");

    #[cfg(not(feature = "parallel"))]
    let runs = seeds.iter().map(|&seed| run_one(records, base, seed)).collect();

    #[cfg(feature = "parallel")]
    let runs = {
        use rayon::prelude::*;
        seeds.par_iter().map(|&seed| run_one(records, base, seed)).collect()
    };

    runs
}

fn run_one(records: &[NeighbourhoodRecord], base: &Config, seed: u64) -> SimResult<BatchRun> {
    let mut config = base.clone();
    config.run.seed = seed;
    let mut sim = SimBuilder::new(config, records.to_vec()).build()?;
    let rounds = sim.run(&mut NoopObserver);
    Ok(BatchRun { seed, rounds, final_stats: sim.last_stats().copied() })
}
