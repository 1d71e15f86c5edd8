//! Project listing and creation.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::handlers::ApiError;
use crate::server::AppState;

pub async fn list_projects(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let projects = state.projects.list().await?;
    Ok(Json(json!({ "projects": projects })))
}

#[derive(Debug, Deserialize)]
pub struct CreateProjectBody {
    pub name: String,
}

pub async fn create_project(
    State(state): State<AppState>,
    Json(body): Json<CreateProjectBody>,
) -> Result<Json<Value>, ApiError> {
    state.projects.create(&body.name).await?;
    Ok(Json(json!({ "success": true, "project": body.name })))
}
