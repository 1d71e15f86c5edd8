//! HTTP surface: router construction and the serve loop.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::{delete, get, post};
use codepad_core::{ProjectStore, SecretStore};
use codepad_runner::{CodeRunner, ShellRunner};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::handlers;

/// Shared resources for request handlers. Everything here is stateless or
/// filesystem-backed; there is no per-request mutable state to guard.
#[derive(Clone)]
pub struct AppState {
    pub projects: Arc<ProjectStore>,
    pub secrets: Arc<SecretStore>,
    pub code: Arc<CodeRunner>,
    pub shell: Arc<ShellRunner>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/projects", get(handlers::projects::list_projects))
        .route("/api/create-project", post(handlers::projects::create_project))
        .route("/api/files/{project}", get(handlers::files::list_tree))
        .route(
            "/api/file/{project}/{*path}",
            get(handlers::files::read_file)
                .post(handlers::files::write_file)
                .delete(handlers::files::delete_file),
        )
        .route("/api/create-file/{project}", post(handlers::files::create_node))
        .route("/api/run", post(handlers::run::run_code))
        .route("/api/shell", post(handlers::run::run_shell))
        .route(
            "/api/secrets/{project}",
            get(handlers::secrets::list_secrets).post(handlers::secrets::set_secret),
        )
        .route(
            "/api/secrets/{project}/{key}",
            delete(handlers::secrets::delete_secret),
        )
        .with_state(state)
        .layer(CorsLayer::permissive())
}

pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "codepad server listening");
    axum::serve(listener, build_router(state))
        .await
        .context("server error")
}
