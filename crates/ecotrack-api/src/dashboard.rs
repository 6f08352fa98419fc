use axum::{Extension, Json, extract::State, response::IntoResponse};
use chrono::Utc;

use ecotrack_core::calculator::round_kg;
use ecotrack_core::dashboard::summarize;
use ecotrack_types::api::{Claims, ProfileResponse};

use crate::error::ApiError;
use crate::state::{AppState, with_db};

pub async fn get_dashboard(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let (entries, rewards) = with_db(&state, move |db| {
        Ok((db.get_entries(&claims.username)?, db.get_rewards(&claims.username)?))
    })
    .await?;

    let today = Utc::now().date_naive();
    Ok(Json(summarize(&entries, &rewards.monthly_goals, today)))
}

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let (user, entries) = with_db(&state, move |db| {
        let user = match db.get_user_by_username(&claims.username)? {
            Some(row) => Some(row.to_user()?),
            None => None,
        };
        Ok((user, db.get_entries(&claims.username)?))
    })
    .await?;
    // Token outlived its account
    let user = user.ok_or(ApiError::NotFound)?;

    Ok(Json(ProfileResponse {
        user_id: user.id,
        username: user.username,
        member_since: user.created_at,
        total_entries: entries.len(),
        total_co2: round_kg(entries.iter().map(|e| e.co2_amount).sum()),
    }))
}
