//! Per-project secrets endpoints.

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::handlers::ApiError;
use crate::server::AppState;

pub async fn list_secrets(
    State(state): State<AppState>,
    Path(project): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let secrets = state.secrets.list(&project).await?;
    Ok(Json(json!({ "secrets": secrets })))
}

#[derive(Debug, Deserialize)]
pub struct SetSecretBody {
    pub key: String,
    pub value: String,
}

pub async fn set_secret(
    State(state): State<AppState>,
    Path(project): Path<String>,
    Json(body): Json<SetSecretBody>,
) -> Result<Json<Value>, ApiError> {
    state.secrets.set(&project, &body.key, &body.value).await?;
    Ok(Json(json!({ "success": true })))
}

pub async fn delete_secret(
    State(state): State<AppState>,
    Path((project, key)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    state.secrets.remove(&project, &key).await?;
    Ok(Json(json!({ "success": true })))
}
