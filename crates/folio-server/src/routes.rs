//! Route definitions for the content API.

use crate::handlers::{content, login, messages};
use crate::middleware::require_admin;
use crate::state::AppState;
use axum::{
    Json, Router, middleware,
    routing::{delete, get, post, put},
};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the application router.
///
/// Everything under `/api/admin/` except `login` is wrapped by
/// [`require_admin`], so an unauthenticated request never reaches a handler.
pub fn router(state: AppState) -> Router {
    let public = Router::new()
        .route("/api/", get(content::root))
        .route("/api/company", get(content::get_company))
        .route("/api/services", get(content::list_services))
        .route("/api/services/{id}", get(content::get_service))
        .route("/api/projects", get(content::list_projects))
        .route("/api/projects/{id}", get(content::get_project))
        .route("/api/contact", post(messages::create_message))
        .route("/api/admin/login", post(login::login));

    let admin = Router::new()
        .route("/api/admin/me", get(login::whoami))
        .route("/api/admin/company", put(content::update_company))
        .route("/api/admin/services", post(content::create_service))
        .route(
            "/api/admin/services/{id}",
            put(content::update_service).delete(content::delete_service),
        )
        .route("/api/admin/projects", post(content::create_project))
        .route(
            "/api/admin/projects/{id}",
            put(content::update_project).delete(content::delete_project),
        )
        .route("/api/admin/messages", get(messages::list_messages))
        .route("/api/admin/messages/{id}", delete(messages::delete_message))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route("/healthz", get(healthz))
        .merge(public)
        .merge(admin)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

async fn healthz() -> Json<Value> {
    Json(json!({ "ok": true, "service": "folio" }))
}
