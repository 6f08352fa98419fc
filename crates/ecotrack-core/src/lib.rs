//! Domain logic for EcoTrack: emission factors, entry construction, the
//! rewards engine and the read-side aggregations. Nothing in here touches
//! storage or the network.

pub mod calculator;
pub mod dashboard;
pub mod entries;
pub mod error;
pub mod leaderboard;
pub mod rewards;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{Error, Result};
