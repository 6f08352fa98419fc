use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Entry;

// -- JWT Claims --

/// Request-scoped identity. The auth middleware decodes it from the bearer
/// token and hands it to handlers as an extension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub exp: usize,
}

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub username: String,
    pub token: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user_id: Uuid,
    pub username: String,
    pub token: String,
    pub streak_days: u32,
    /// Streak badges earned by this login, if any.
    pub badges_awarded: Vec<String>,
}

// -- Entries --

#[derive(Debug, Serialize, Deserialize)]
pub struct EntryListResponse {
    pub entries: Vec<Entry>,
    pub total_co2: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClearEntriesResponse {
    pub removed: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EstimateResponse {
    pub co2_amount: f64,
}

// -- Profile --

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user_id: Uuid,
    pub username: String,
    pub member_since: DateTime<Utc>,
    pub total_entries: usize,
    pub total_co2: f64,
}

// -- Errors --

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
