//! Login and identity handlers.
//!
//! `POST /api/admin/login` - Exchange a username and password for a token.
//! `GET /api/admin/me` - Report the principal behind the presented token.

use crate::error::ApiError;
use crate::middleware::AdminPrincipal;
use crate::state::AppState;
use axum::{Json, extract::State};
use folio_auth::{Credential, authenticate};
use folio_store::{Filter, collections::ADMIN_USERS};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

/// `POST /api/admin/login`: exchange a username and password for a bearer token.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let credential = state
        .store
        .find_one(
            ADMIN_USERS,
            &Filter::eq("username", request.username.as_str()),
        )
        .await?
        .map(serde_json::from_value::<Credential>)
        .transpose()
        .map_err(anyhow::Error::from)?;

    let LoginRequest { username, password } = request;
    let attempted = username.clone();
    let verified = tokio::task::spawn_blocking(move || {
        authenticate(credential.as_ref(), &username, &password)
    })
    .await
    .map_err(anyhow::Error::from)?;

    let subject = match verified {
        Ok(subject) => subject,
        Err(err) => {
            tracing::info!(username = %attempted, "Admin login failed");
            return Err(err.into());
        }
    };

    let issued = state.tokens.issue(&subject)?;
    tracing::info!(
        username = %subject,
        expires_at = %issued.claims.expires_at,
        "Admin login succeeded"
    );

    Ok(Json(TokenResponse {
        access_token: issued.token,
        token_type: "bearer",
    }))
}

/// `GET /api/admin/me`: the principal the gate attached to this request.
pub async fn whoami(principal: AdminPrincipal) -> Json<Value> {
    Json(json!({ "username": principal.username }))
}
