//! Company profile, services and projects.
//!
//! Reads are public. Writes sit behind the admin gate; see
//! [`crate::routes::router`].

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
};
use folio_store::{
    Document, Filter,
    collections::{COMPANY_INFO, PROJECTS, SERVICES},
};
use serde_json::{Map, Value, json};

/// A content collection and the name used for it in error messages.
#[derive(Debug, Clone, Copy)]
struct Resource {
    collection: &'static str,
    label: &'static str,
}

const SERVICE: Resource = Resource {
    collection: SERVICES,
    label: "Service",
};

const PROJECT: Resource = Resource {
    collection: PROJECTS,
    label: "Project",
};

const COMPANY: Resource = Resource {
    collection: COMPANY_INFO,
    label: "Company info",
};

// --- shared operations -----------------------------------------------------

async fn list(state: &AppState, resource: Resource) -> Result<Vec<Document>, ApiError> {
    Ok(state
        .store
        .find_many(resource.collection, &Filter::all())
        .await?)
}

async fn fetch(
    state: &AppState,
    resource: Resource,
    filter: &Filter,
) -> Result<Document, ApiError> {
    state
        .store
        .find_one(resource.collection, filter)
        .await?
        .ok_or(ApiError::NotFound(resource.label))
}

async fn create(state: &AppState, resource: Resource, body: Value) -> Result<Document, ApiError> {
    let Value::Object(mut fields) = body else {
        return Err(ApiError::BadRequest(
            "Request body must be a JSON object".to_string(),
        ));
    };
    let id = uuid::Uuid::new_v4().to_string();
    fields.insert("id".to_string(), Value::String(id.clone()));

    let doc = Value::Object(fields);
    state
        .store
        .insert_one(resource.collection, doc.clone())
        .await?;
    tracing::info!(collection = resource.collection, id = %id, "Created document");
    Ok(doc)
}

async fn update(
    state: &AppState,
    resource: Resource,
    filter: Filter,
    body: Value,
) -> Result<Document, ApiError> {
    let changes = update_fields(body)?;
    let matched = state
        .store
        .update_one(resource.collection, &filter, Value::Object(changes))
        .await?;
    if matched == 0 {
        return Err(ApiError::NotFound(resource.label));
    }
    tracing::info!(collection = resource.collection, "Updated document");
    fetch(state, resource, &filter).await
}

async fn remove(
    state: &AppState,
    resource: Resource,
    id: &str,
) -> Result<(), ApiError> {
    let deleted = state
        .store
        .delete_one(resource.collection, &Filter::by_id(id))
        .await?;
    if deleted == 0 {
        return Err(ApiError::NotFound(resource.label));
    }
    tracing::info!(collection = resource.collection, id, "Deleted document");
    Ok(())
}

/// Keep only the fields an update may set: no `id`, no nulls.
fn update_fields(body: Value) -> Result<Map<String, Value>, ApiError> {
    let Value::Object(fields) = body else {
        return Err(ApiError::BadRequest(
            "Request body must be a JSON object".to_string(),
        ));
    };
    let changes: Map<String, Value> = fields
        .into_iter()
        .filter(|(field, value)| field != "id" && !value.is_null())
        .collect();
    if changes.is_empty() {
        return Err(ApiError::BadRequest("No data to update".to_string()));
    }
    Ok(changes)
}

// --- public ----------------------------------------------------------------

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "folio content API" }))
}

pub async fn get_company(State(state): State<AppState>) -> Result<Json<Document>, ApiError> {
    fetch(&state, COMPANY, &Filter::all()).await.map(Json)
}

pub async fn list_services(State(state): State<AppState>) -> Result<Json<Vec<Document>>, ApiError> {
    list(&state, SERVICE).await.map(Json)
}

pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Document>, ApiError> {
    fetch(&state, SERVICE, &Filter::by_id(id)).await.map(Json)
}

pub async fn list_projects(State(state): State<AppState>) -> Result<Json<Vec<Document>>, ApiError> {
    list(&state, PROJECT).await.map(Json)
}

pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Document>, ApiError> {
    fetch(&state, PROJECT, &Filter::by_id(id)).await.map(Json)
}

// --- admin -----------------------------------------------------------------

pub async fn update_company(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Document>, ApiError> {
    update(&state, COMPANY, Filter::all(), body).await.map(Json)
}

pub async fn create_service(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Document>, ApiError> {
    create(&state, SERVICE, body).await.map(Json)
}

pub async fn update_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Document>, ApiError> {
    update(&state, SERVICE, Filter::by_id(id), body).await.map(Json)
}

pub async fn delete_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    remove(&state, SERVICE, &id).await?;
    Ok(Json(json!({ "message": "Service deleted successfully" })))
}

pub async fn create_project(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Document>, ApiError> {
    create(&state, PROJECT, body).await.map(Json)
}

pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Document>, ApiError> {
    update(&state, PROJECT, Filter::by_id(id), body).await.map(Json)
}

pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    remove(&state, PROJECT, &id).await?;
    Ok(Json(json!({ "message": "Project deleted successfully" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_fields_drops_id_and_nulls() {
        let changes =
            update_fields(json!({"id": "x", "title": "New", "image": null})).unwrap();
        assert_eq!(Value::Object(changes), json!({"title": "New"}));
    }

    #[test]
    fn test_update_fields_rejects_empty() {
        assert!(matches!(
            update_fields(json!({"id": "x", "title": null})),
            Err(ApiError::BadRequest(msg)) if msg == "No data to update"
        ));
        assert!(matches!(
            update_fields(json!({})),
            Err(ApiError::BadRequest(_))
        ));
        assert!(matches!(
            update_fields(json!(["title"])),
            Err(ApiError::BadRequest(_))
        ));
    }
}
