use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Request-level failure taxonomy. Client-facing messages stay generic so a
/// caller cannot probe which half of a credential pair was wrong.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Please use a valid educational email (.edu, .ac.in, etc.) or a demo email")]
    IneligibleEmail,
    #[error("Email already registered")]
    EmailAlreadyRegistered,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Token expired")]
    TokenExpired,
    #[error("Invalid token")]
    TokenInvalid,
    #[error("Not authenticated")]
    Unauthenticated,
    #[error("Invalid role. Choose from: SDE, Data Analyst, Data Scientist, ML Engineer")]
    InvalidRole,
    #[error("Task not found")]
    TaskNotFound,
    #[error("Internal server error")]
    Store(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::IneligibleEmail
            | ApiError::EmailAlreadyRegistered
            | ApiError::InvalidRole => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials
            | ApiError::TokenExpired
            | ApiError::TokenInvalid
            | ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::TaskNotFound => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Store(e) = &self {
            tracing::error!(error = %e, "store failure");
        }
        let status = self.status();
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
