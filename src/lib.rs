//! shelfkeep: inventory and daily bookkeeping for a small shop, run against a
//! simulated calendar.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`], command dispatch in [`cli`].

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod logging;
pub mod ports;
