//! Pull-query handlers

use axum::{extract::State, response::Json};

use super::AppState;
use crate::tally::TallySnapshot;

/// GET /tally - current ranked tally
///
/// Returns the same ranked order the push stream delivers, so both channels
/// agree on what the leaderboard looks like.
pub async fn get_tally(State(app): State<AppState>) -> Json<TallySnapshot> {
    Json(app.state.snapshot())
}
