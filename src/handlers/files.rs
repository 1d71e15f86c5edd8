//! File CRUD endpoints, all confined to a project directory.

use axum::Json;
use axum::extract::{Path, State};
use codepad_core::{NodeKind, ProjectFileStore};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::handlers::ApiError;
use crate::server::AppState;

async fn store_for(state: &AppState, project: &str) -> Result<ProjectFileStore, ApiError> {
    let dir = state.projects.existing_dir(project).await?;
    Ok(ProjectFileStore::new(dir))
}

pub async fn list_tree(
    State(state): State<AppState>,
    Path(project): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let store = store_for(&state, &project).await?;
    let files = store.list_tree()?;
    Ok(Json(json!({ "files": files })))
}

pub async fn read_file(
    State(state): State<AppState>,
    Path((project, path)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let store = store_for(&state, &project).await?;
    let content = store.read(&path).await?;
    Ok(Json(json!({ "content": content, "path": path })))
}

#[derive(Debug, Deserialize)]
pub struct WriteFileBody {
    pub content: String,
}

pub async fn write_file(
    State(state): State<AppState>,
    Path((project, path)): Path<(String, String)>,
    Json(body): Json<WriteFileBody>,
) -> Result<Json<Value>, ApiError> {
    let store = store_for(&state, &project).await?;
    store.write(&path, &body.content).await?;
    Ok(Json(json!({ "success": true })))
}

pub async fn delete_file(
    State(state): State<AppState>,
    Path((project, path)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let store = store_for(&state, &project).await?;
    store.delete(&path).await?;
    Ok(Json(json!({ "success": true })))
}

#[derive(Debug, Deserialize)]
pub struct CreateNodeBody {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

pub async fn create_node(
    State(state): State<AppState>,
    Path(project): Path<String>,
    Json(body): Json<CreateNodeBody>,
) -> Result<Json<Value>, ApiError> {
    let store = store_for(&state, &project).await?;
    let kind = match body.kind.as_deref() {
        Some("folder") => NodeKind::Folder,
        _ => NodeKind::File,
    };
    store.create(&body.name, kind).await?;
    Ok(Json(json!({ "success": true })))
}
