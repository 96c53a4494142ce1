//! Contact-form messages: anyone may submit, only admins may read or delete.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{SecondsFormat, Utc};
use folio_store::{Document, Filter, collections::CONTACT_MESSAGES};
use serde_json::{Value, json};

pub async fn create_message(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Document>, ApiError> {
    let Value::Object(mut fields) = body else {
        return Err(ApiError::BadRequest(
            "Request body must be a JSON object".to_string(),
        ));
    };

    let id = uuid::Uuid::new_v4().to_string();
    fields.insert("id".to_string(), Value::String(id.clone()));
    fields.insert(
        "createdAt".to_string(),
        Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)),
    );
    fields.insert("isRead".to_string(), Value::Bool(false));

    let doc = Value::Object(fields);
    state.store.insert_one(CONTACT_MESSAGES, doc.clone()).await?;
    tracing::info!(id = %id, "Received contact message");
    Ok(Json(doc))
}

/// Newest first.
pub async fn list_messages(
    State(state): State<AppState>,
) -> Result<Json<Vec<Document>>, ApiError> {
    let mut messages = state
        .store
        .find_many(CONTACT_MESSAGES, &Filter::all())
        .await?;
    messages.sort_by(|a, b| created_at(b).cmp(created_at(a)));
    Ok(Json(messages))
}

pub async fn delete_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let deleted = state
        .store
        .delete_one(CONTACT_MESSAGES, &Filter::by_id(id.as_str()))
        .await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Message"));
    }
    tracing::info!(id = %id, "Deleted contact message");
    Ok(Json(json!({ "message": "Contact message deleted successfully" })))
}

fn created_at(message: &Document) -> &str {
    message
        .get("createdAt")
        .and_then(Value::as_str)
        .unwrap_or_default()
}
