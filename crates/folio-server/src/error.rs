//! Error types for the server crate.

use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use folio_auth::AuthError;
use folio_store::StoreError;
use serde_json::json;
use thiserror::Error;

/// Errors returned by request handlers and the access gate.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request carried no usable bearer token.
    ///
    /// Missing, malformed, forged and expired tokens all collapse into this
    /// one variant so callers cannot tell them apart.
    #[error("Not authenticated")]
    Unauthenticated,

    /// Login with an unknown username or a wrong password.
    #[error("Incorrect username or password")]
    InvalidLogin,

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Invalid request.
    #[error("{0}")]
    BadRequest(String),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Internal(err.into())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => ApiError::InvalidLogin,
            err if err.is_rejection() => ApiError::Unauthenticated,
            err => ApiError::Internal(err.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Unauthenticated | ApiError::InvalidLogin => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let detail = match &self {
            ApiError::Internal(err) => {
                tracing::error!(error = %err, "Request failed");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({ "detail": detail }));
        match status {
            StatusCode::UNAUTHORIZED => {
                (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response()
            }
            _ => (status, body).into_response(),
        }
    }
}
