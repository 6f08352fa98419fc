//! HTTP surface for EcoTrack: axum handlers, JWT auth and the router.

pub mod auth;
pub mod dashboard;
pub mod entries;
pub mod error;
pub mod extract;
pub mod leaderboard;
pub mod middleware;
pub mod rewards;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::{AppState, AppStateInner};
