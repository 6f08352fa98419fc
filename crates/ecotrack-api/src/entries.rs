use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use ecotrack_core::calculator::{Activity, round_kg};
use ecotrack_core::dashboard::EntryFilter;
use ecotrack_core::entries::{NewEntry, validate_activity};
use ecotrack_types::api::{Claims, ClearEntriesResponse, EntryListResponse, EstimateResponse};

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::{AppState, with_db};

pub async fn create_entry(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ApiJson(req): ApiJson<NewEntry>,
) -> Result<impl IntoResponse, ApiError> {
    let entry = req.into_entry(&claims.username, Utc::now())?;

    let stored = entry.clone();
    with_db(&state, move |db| db.add_entry(&stored)).await?;

    debug!(
        user = %claims.username,
        category = %entry.category,
        co2 = entry.co2_amount,
        "Entry added"
    );
    Ok((StatusCode::CREATED, Json(entry)))
}

/// History view: optional category and inclusive date range, newest first.
pub async fn list_entries(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ApiQuery(filter): ApiQuery<EntryFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let entries = with_db(&state, move |db| db.get_entries(&claims.username)).await?;
    let (entries, total_co2) = filter.apply(entries);
    Ok(Json(EntryListResponse { entries, total_co2 }))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ApiPath(entry_id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let removed = with_db(&state, move |db| db.delete_entry(&entry_id, &claims.username)).await?;
    if !removed {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn clear_entries(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let username = claims.username.clone();
    let removed = with_db(&state, move |db| db.clear_entries(&username)).await?;
    info!(user = %claims.username, removed, "Entries cleared");
    Ok(Json(ClearEntriesResponse { removed }))
}

/// Price an activity without storing it.
pub async fn estimate(ApiJson(activity): ApiJson<Activity>) -> Result<impl IntoResponse, ApiError> {
    validate_activity(&activity)?;
    Ok(Json(EstimateResponse {
        co2_amount: round_kg(activity.co2_kg()),
    }))
}
