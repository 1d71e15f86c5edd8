//! Boot-time assembly: on-disk layout and shared state.

use std::sync::Arc;

use anyhow::{Context, Result};
use codepad_core::{ProjectStore, SecretStore};
use codepad_runner::{CodeRunner, ProcessSandbox, Sandbox, ShellRunner};
use tracing::info;

use crate::config::ServerConfig;
use crate::server::AppState;

/// Create the on-disk layout (projects root, scratch dir, secrets dir, seeded
/// sample project) and assemble the shared state.
pub async fn bootstrap(config: &ServerConfig) -> Result<AppState> {
    let mut projects = ProjectStore::new(config.storage.projects_dir.clone());
    projects
        .ensure_layout()
        .await
        .context("failed to prepare projects directory")?;

    let secrets = SecretStore::new(config.storage.secrets_dir.clone());
    secrets
        .ensure_layout()
        .await
        .context("failed to prepare secrets directory")?;

    tokio::fs::create_dir_all(&config.storage.scratch_dir)
        .await
        .context("failed to prepare scratch directory")?;

    info!(
        projects_dir = %config.storage.projects_dir.display(),
        scratch_dir = %config.storage.scratch_dir.display(),
        "storage layout ready"
    );

    let sandbox: Arc<dyn Sandbox> = Arc::new(ProcessSandbox::new());
    let code = CodeRunner::new(sandbox.clone(), config.storage.scratch_dir.clone())
        .with_limits(config.code_limits());
    let shell = ShellRunner::new(sandbox).with_limits(config.shell_limits());

    Ok(AppState {
        projects: Arc::new(projects),
        secrets: Arc::new(secrets),
        code: Arc::new(code),
        shell: Arc::new(shell),
    })
}
