use axum::{Json, extract::State, response::IntoResponse};

use ecotrack_core::leaderboard::rank;

use crate::error::ApiError;
use crate::state::{AppState, with_db};

pub async fn get_leaderboard(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let totals = with_db(&state, |db| db.user_totals()).await?;
    Ok(Json(rank(totals)))
}
