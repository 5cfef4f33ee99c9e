//! `hm-agent` — agent storage and the utility model for the housing market.
//!
//! # Crate layout
//!
//! | Module             | Contents                                                   |
//! |--------------------|------------------------------------------------------------|
//! | [`neighbourhood`]  | `NeighbourhoodRecord` (input row), `Neighbourhood`, `QualityIndex`, `NeighbourhoodStats` |
//! | [`dwelling`]       | `Dwelling`                                                 |
//! | [`resident`]       | `Resident`, `Preferences`                                  |
//! | [`utility`]        | `UtilityModel`, `WealthReference` (Cobb-Douglas contentment) |
//! | [`market`]         | `Market` arena and its ownership primitives                |
//! | [`stats`]          | Per-neighbourhood aggregate recomputation                  |
//! | [`placement`]      | `Placement` trait for cosmetic coordinates                 |
//! | [`loader`]         | CSV neighbourhood table loader                             |
//! | [`builder`]        | `MarketBuilder` (initial population and housing stock)     |
//!
//! Residents and dwellings reference each other by id.  The only code that
//! writes those links is [`Market::occupy`], [`Market::vacate`] and
//! [`Market::exchange`], each of which updates both sides in one call.

pub mod builder;
pub mod dwelling;
pub mod loader;
pub mod market;
pub mod neighbourhood;
pub mod placement;
pub mod resident;
pub mod stats;
pub mod utility;


pub use builder::MarketBuilder;
pub use dwelling::Dwelling;
pub use loader::{load_neighbourhoods_csv, load_neighbourhoods_reader};
pub use market::Market;
pub use neighbourhood::{Neighbourhood, NeighbourhoodRecord, NeighbourhoodStats, QualityIndex};
pub use placement::{JitterPlacement, NullPlacement, Placement};
pub use resident::{Preferences, Resident};
pub use utility::{UtilityModel, WealthReference};
