//! # Medal Tally Service
//!
//! Live leaderboard of per-country medal counts. Award events arrive over a
//! raw TCP channel (newline-delimited JSON); every applied event recomputes
//! the ranked tally and fans it out to all socket clients and to an SSE
//! subscription stream served by the HTTP API.
//!
//! **Architecture:** shared in-memory board behind [`state::SharedState`],
//! broadcast-channel fan-out, axum HTTP surface for pull queries and push
//! subscriptions.

pub mod api;
pub mod error;
pub mod ingest;
pub mod scoring;
pub mod state;
pub mod tally;

pub use error::{Error, Result};
pub use state::SharedState;
