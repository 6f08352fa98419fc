use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use ecotrack_types::api::ErrorResponse;
use thiserror::Error;
use tracing::{error, warn};

/// Errors a handler can return. Each maps to one status code; internal
/// failures are logged and reported without detail.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Input the user can fix.
    #[error("{0}")]
    Validation(String),

    #[error("username already taken")]
    UsernameTaken,

    #[error("invalid username or password")]
    InvalidCredentials,

    /// Missing, malformed or expired bearer token.
    #[error("unauthorized")]
    Unauthorized,

    /// Also used for records owned by another user.
    #[error("not found")]
    NotFound,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<ecotrack_core::Error> for ApiError {
    fn from(e: ecotrack_core::Error) -> Self {
        Self::Validation(e.to_string())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::UsernameTaken => StatusCode::CONFLICT,
            Self::InvalidCredentials | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Internal(e) => {
                error!("Request failed: {:#}", e);
                "internal server error".to_string()
            }
            Self::Validation(msg) => {
                warn!("Rejected input: {}", msg);
                msg.clone()
            }
            other => other.to_string(),
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses() {
        assert_eq!(ApiError::Validation("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::UsernameTaken.status(), StatusCode::CONFLICT);
        assert_eq!(ApiError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::from(anyhow::anyhow!("disk on fire")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn core_errors_become_validation() {
        let err: ApiError = ecotrack_core::Error::InvalidMonth("2026-13".into()).into();
        assert!(matches!(err, ApiError::Validation(ref m) if m.contains("2026-13")));
    }
}
