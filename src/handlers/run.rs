//! Execution endpoints. These never hard-fail: every outcome, including
//! denylist hits, timeouts, and unexpected runner errors, is a 200 whose
//! `type` field carries the classification.

use axum::Json;
use axum::extract::State;
use codepad_runner::{RunKind, RunOutcome};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::warn;

use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct RunCodeBody {
    pub code: String,
    #[serde(default)]
    pub language: String,
}

pub async fn run_code(
    State(state): State<AppState>,
    Json(body): Json<RunCodeBody>,
) -> Json<Value> {
    let outcome = state
        .code
        .run(&body.code, &body.language)
        .await
        .unwrap_or_else(|error| {
            warn!(%error, "code run failed unexpectedly");
            RunOutcome::error(format!("{error:#}"))
        });

    // HTML is not executed; the raw markup rides along for the preview panel.
    if outcome.kind == RunKind::Html {
        return Json(json!({
            "output": "HTML Preview available in the preview panel",
            "type": outcome.kind,
            "content": outcome.output,
        }));
    }
    Json(json!({ "output": outcome.output, "type": outcome.kind }))
}

#[derive(Debug, Deserialize)]
pub struct RunShellBody {
    pub command: String,
    #[serde(default)]
    pub project: Option<String>,
}

pub async fn run_shell(
    State(state): State<AppState>,
    Json(body): Json<RunShellBody>,
) -> Json<Value> {
    // Project names are untrusted; resolution goes through the same
    // confinement as file paths. Failures stay soft per this endpoint's
    // convention.
    let working_dir = match &body.project {
        Some(project) => match state.projects.existing_dir(project).await {
            Ok(dir) => dir,
            Err(error) => {
                let outcome = RunOutcome::error(error.to_string());
                return Json(json!({ "output": outcome.output, "type": outcome.kind }));
            }
        },
        None => state.projects.root().to_path_buf(),
    };

    let outcome = state
        .shell
        .run(&body.command, working_dir)
        .await
        .unwrap_or_else(|error| {
            warn!(%error, "shell run failed unexpectedly");
            RunOutcome::error(format!("{error:#}"))
        });
    Json(json!({ "output": outcome.output, "type": outcome.kind }))
}
