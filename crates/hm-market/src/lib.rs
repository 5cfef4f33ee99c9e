//! `hm-market` — market clearing for the housing-market simulation.
//!
//! Two clearing passes run every round, in this order:
//!
//! ```text
//! ① Auction   — housed seekers trade dwellings pairwise when both sides
//!               strictly gain and both can afford the re-priced units.
//! ② Vacancies — each vacant unit goes to the first seeker (housed or
//!               homeless) in random order who gains and can pay.
//! ```
//!
//! Both passes mutate ownership only through [`transaction`], which keeps the
//! resident ↔ dwelling links symmetric and updates move counters.

pub mod auction;
pub mod transaction;
pub mod vacancy;


pub use auction::{AuctionOutcome, run_auction};
pub use transaction::{SwapTerms, VacancyMove, execute_swap, force_sale, move_into};
pub use vacancy::{VacancyOutcome, allocate_vacancies};
