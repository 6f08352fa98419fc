use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::{SaltString, rand_core::OsRng}};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use tracing::info;
use uuid::Uuid;

use ecotrack_core::rewards::record_login;
use ecotrack_types::api::{Claims, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::{AppState, with_db};

const MIN_PASSWORD_LEN: usize = 6;

pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let username = req.username.trim().to_string();
    let len = username.chars().count();
    if !(3..=32).contains(&len) {
        return Err(ApiError::Validation(
            "username must be between 3 and 32 characters".into(),
        ));
    }
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::Validation(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }

    // Hash password with Argon2id
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("hashing password: {}", e))?
        .to_string();

    let user_id = Uuid::new_v4();
    let name = username.clone();
    // The UNIQUE constraint decides races between concurrent signups.
    let created =
        with_db(&state, move |db| db.create_user(&user_id.to_string(), &name, &password_hash))
            .await?;
    if !created {
        return Err(ApiError::UsernameTaken);
    }

    info!(%username, "User registered");
    let token = create_token(&state, user_id, &username)?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id,
            username,
            token,
        }),
    ))
}

/// Verify credentials, then advance the daily login streak.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let username = req.username.trim().to_string();
    let user = with_db(&state, move |db| db.get_user_by_username(&username))
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    // Verify password
    let parsed_hash = PasswordHash::new(&user.password)
        .map_err(|e| anyhow::anyhow!("stored hash for {} is malformed: {}", user.username, e))?;

    Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .map_err(|_| ApiError::InvalidCredentials)?;

    let user_id: Uuid = user.id.parse().map_err(anyhow::Error::from)?;

    let today = Utc::now().date_naive();
    let name = user.username.clone();
    let outcome = with_db(&state, move |db| {
        let mut rewards = db.get_rewards(&name)?;
        let outcome = record_login(&mut rewards, today);
        if outcome.changed {
            db.save_rewards(&name, &rewards)?;
        }
        Ok(outcome)
    })
    .await?;

    let token = create_token(&state, user_id, &user.username)?;

    Ok(Json(LoginResponse {
        user_id,
        username: user.username,
        token,
        streak_days: outcome.streak_days,
        badges_awarded: outcome.badges_awarded.iter().map(|b| b.to_string()).collect(),
    }))
}

fn create_token(state: &AppState, user_id: Uuid, username: &str) -> anyhow::Result<String> {
    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        exp: (Utc::now() + chrono::Duration::days(state.token_days)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.jwt_secret.as_bytes()),
    )?;

    Ok(token)
}
