//! `hm-sim` — round loop for the housing-market simulation.
//!
//! # Round structure
//!
//! ```text
//! for round in 1..=run.max_rounds:
//!   ① Growth     — newcomers arrive homeless; each neighbourhood's capacity
//!                  grows and the shortfall is built as vacant units;
//!                  optional noise on quality indices.
//!   ② Auction    — housed seekers swap dwellings when both strictly gain.
//!   ③ Vacancies  — vacant units go to the first willing, solvent seeker.
//!   ④ Update     — salary in, expense out, forced sales, contentment and
//!                  seeking recomputed.
//!   ⑤ Statistics — neighbourhood aggregates and a RoundStats summary.
//!   ⑥ Stop       — optional quiescence test (static models only).
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs [`batch::run_batch`] members on Rayon's pool.     |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use hm_core::Config;
//! use hm_sim::{NoopObserver, SimBuilder};
//!
//! let records = hm_agent::load_neighbourhoods_csv("neighbourhoods.csv")?;
//! let mut sim = SimBuilder::new(Config::default(), records).build()?;
//! sim.run(&mut NoopObserver);
//! ```

pub mod batch;
pub mod builder;
pub mod error;
pub mod growth;
pub mod observer;
pub mod sim;
pub mod stats;
pub mod update;

#[cfg(test)]
mod tests;

pub use batch::{BatchRun, run_batch};
pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
pub use stats::RoundStats;
