//! `hm-core` — foundational types for the housing-market simulation.
//!
//! This crate is a dependency of every other `hm-*` crate.  It has no `hm-*`
//! dependencies of its own.
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`ids`]         | `ResidentId`, `DwellingId`, `NeighbourhoodId`             |
//! | [`geo`]         | `GeoPoint` (cosmetic placement coordinate)                |
//! | [`config`]      | `Config`, `ModelConfig`, `RunConfig`, `StopCondition`     |
//! | [`rng`]         | `SimRng` with salary / preference samplers                |
//! | [`error`]       | `HmError`, `HmResult`                                     |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{Config, ModelConfig, RunConfig, StopCondition};
pub use error::{HmError, HmResult};
pub use geo::GeoPoint;
pub use ids::{DwellingId, NeighbourhoodId, ResidentId};
pub use rng::SimRng;
