//! Admin gate for protected routes.
//!
//! [`require_admin`] runs before every admin handler. It reads the bearer
//! token, validates it and stores the [`AdminPrincipal`] in request
//! extensions. Every failure yields the same 401 response.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use folio_auth::{AuthError, TokenAuthority, TokenClaims};

/// The administrator a request is acting as.
///
/// Inserted into request extensions by [`require_admin`]; handlers behind the
/// gate take it as an extractor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminPrincipal {
    pub username: String,
}

/// Axum middleware guarding the admin routes.
///
/// - read `Authorization: Bearer <token>`
/// - validate signature and expiry through the token authority
/// - attach the principal, or answer 401 without running the handler
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = match authenticate_headers(&state.tokens, req.headers()) {
        Ok(claims) => claims,
        Err(err) => {
            log_rejection(&err, req.uri().path());
            return Err(ApiError::Unauthenticated);
        }
    };

    tracing::debug!(subject = %claims.subject, path = %req.uri().path(), "Admin request authorized");
    req.extensions_mut().insert(AdminPrincipal {
        username: claims.subject,
    });

    Ok(next.run(req).await)
}

/// Resolve the bearer token in `headers` to validated claims.
pub fn authenticate_headers(
    tokens: &TokenAuthority,
    headers: &HeaderMap,
) -> Result<TokenClaims, AuthError> {
    let token = extract_bearer(headers).ok_or(AuthError::MissingToken)?;
    tokens.validate(token)
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

fn log_rejection(err: &AuthError, path: &str) {
    match err {
        AuthError::MissingToken | AuthError::ExpiredToken { .. } => {
            tracing::debug!(path, reason = %err, "Rejected admin request");
        }
        AuthError::InvalidToken(_) => {
            tracing::warn!(path, reason = %err, "Rejected admin request");
        }
        other => {
            tracing::error!(path, error = %other, "Token validation failed");
        }
    }
}

impl<S> FromRequestParts<S> for AdminPrincipal
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AdminPrincipal>()
            .cloned()
            .ok_or(ApiError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use folio_auth::{KeyPair, TokenSettings};

    fn headers(value: &str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        map
    }

    fn authority() -> TokenAuthority {
        TokenAuthority::new(
            KeyPair::generate().unwrap(),
            TokenSettings::new(chrono::Duration::minutes(30)),
        )
    }

    #[test]
    fn test_extract_bearer() {
        assert_eq!(extract_bearer(&headers("Bearer abc")), Some("abc"));
        assert_eq!(extract_bearer(&headers("bearer abc")), Some("abc"));
        assert_eq!(extract_bearer(&headers("Basic abc")), None);
        assert_eq!(extract_bearer(&headers("Bearer ")), None);
        assert_eq!(extract_bearer(&headers("Bearer")), None);
        assert_eq!(extract_bearer(&HeaderMap::new()), None);
    }

    #[test]
    fn test_authenticate_headers() {
        let tokens = authority();
        let issued = tokens.issue("admin").unwrap();

        let claims =
            authenticate_headers(&tokens, &headers(&format!("Bearer {}", issued.token))).unwrap();
        assert_eq!(claims.subject, "admin");

        assert!(matches!(
            authenticate_headers(&tokens, &HeaderMap::new()),
            Err(AuthError::MissingToken)
        ));
        assert!(matches!(
            authenticate_headers(&tokens, &headers("Bearer not-a-token")),
            Err(AuthError::InvalidToken(_))
        ));
    }
}
