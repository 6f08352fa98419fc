use axum::{
    Extension, Json,
    extract::State,
    response::IntoResponse,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use ecotrack_core::rewards::{
    ACHIEVEMENTS, Achievement, BADGE_TIERS, BadgeTier, RewardsReport, refresh, set_monthly_goal,
};
use ecotrack_types::api::Claims;
use ecotrack_types::models::RewardsState;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::state::{AppState, with_db};

#[derive(Debug, Serialize)]
pub struct RewardsResponse {
    pub state: RewardsState,
    pub report: RewardsReport,
    pub achievements: &'static [Achievement],
    pub badge_tiers: &'static [BadgeTier],
}

#[derive(Debug, Deserialize)]
pub struct GoalRequest {
    pub target_kg: f64,
}

/// Re-evaluate achievements and the weekly bonus, persisting any change.
pub async fn get_rewards(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let today = Utc::now().date_naive();
    let (rewards, report) = with_db(&state, move |db| {
        let entries = db.get_entries(&claims.username)?;
        let mut rewards = db.get_rewards(&claims.username)?;
        let before = rewards.clone();

        let report = refresh(&mut rewards, &entries, today);
        if rewards != before {
            db.save_rewards(&claims.username, &rewards)?;
        }
        Ok((rewards, report))
    })
    .await?;

    Ok(Json(RewardsResponse {
        state: rewards,
        report,
        achievements: ACHIEVEMENTS,
        badge_tiers: BADGE_TIERS,
    }))
}

pub async fn set_goal(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ApiPath(month): ApiPath<String>,
    ApiJson(req): ApiJson<GoalRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mut rewards = {
        let username = claims.username.clone();
        with_db(&state, move |db| db.get_rewards(&username)).await?
    };
    set_monthly_goal(&mut rewards, &month, req.target_kg)?;

    let saved = rewards.clone();
    with_db(&state, move |db| db.save_rewards(&claims.username, &saved)).await?;
    Ok(Json(rewards))
}
