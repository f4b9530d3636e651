use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Outcome of the atomic check-and-book unit. `SlotUnavailable` covers both a
/// missing slot and an already-booked one; either way the unit of work is
/// rolled back.
#[derive(Debug, Error)]
pub enum BookError {
    #[error("slot is missing or already booked")]
    SlotUnavailable,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<diesel::result::Error> for BookError {
    fn from(err: diesel::result::Error) -> Self {
        Self::Storage(err.into())
    }
}

/// Confirmation dispatch failures. These are logged and swallowed by the
/// coordinator, never surfaced to the booking caller.
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("mail request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("mail provider rejected the message: {0}")]
    Rejected(String),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("All fields are required")]
    MissingFields,
    #[error("This slot is no longer available")]
    SlotUnavailable,
    #[error("{0}")]
    InvalidRequest(String),
    #[error("Missing credentials")]
    MissingCredentials,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::MissingFields | ApiError::SlotUnavailable | ApiError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::MissingCredentials | ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}
