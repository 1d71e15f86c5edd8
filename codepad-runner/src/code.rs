//! Snippet execution: language recipes and scratch-file lifecycle.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

use crate::outcome::{RunKind, RunOutcome};
use crate::process::SandboxOptions;
use crate::Sandbox;

/// Languages the run endpoint understands. Execution is an explicit
/// allow-list: anything outside it is refused as policy, not parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Language {
    JavaScript,
    Python,
    Html,
    Css,
    Other(String),
}

impl Language {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "javascript" | "js" => Self::JavaScript,
            "python" | "python3" => Self::Python,
            "html" => Self::Html,
            "css" => Self::Css,
            _ => Self::Other(raw.trim().to_string()),
        }
    }
}

/// Execution limits for one snippet run.
#[derive(Debug, Clone, Copy)]
pub struct CodeLimits {
    pub timeout: Duration,
    pub max_output_bytes: usize,
}

impl Default for CodeLimits {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_output_bytes: 1024 * 1024,
        }
    }
}

/// Runs user snippets through the sandbox via a temporary source file.
///
/// The scratch directory lives outside every project root. A scratch file
/// never outlives the `run` call that created it: deletion is tied to a drop
/// guard, so success, error, and timeout paths all clean up.
pub struct CodeRunner {
    sandbox: Arc<dyn Sandbox>,
    scratch_dir: PathBuf,
    limits: CodeLimits,
}

impl CodeRunner {
    pub fn new(sandbox: Arc<dyn Sandbox>, scratch_dir: PathBuf) -> Self {
        Self {
            sandbox,
            scratch_dir,
            limits: CodeLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: CodeLimits) -> Self {
        self.limits = limits;
        self
    }

    pub async fn run(&self, code: &str, language: &str) -> Result<RunOutcome> {
        let (interpreter, extension) = match Language::parse(language) {
            Language::JavaScript => ("node", "js"),
            Language::Python => ("python3", "py"),
            Language::Html => {
                return Ok(RunOutcome::new(RunKind::Html, code));
            }
            Language::Css => {
                return Ok(RunOutcome::info("CSS is applied in the HTML preview"));
            }
            Language::Other(name) => {
                return Ok(RunOutcome::error(format!(
                    "Language \"{name}\" is not supported for execution yet."
                )));
            }
        };

        tokio::fs::create_dir_all(&self.scratch_dir)
            .await
            .context("failed to create scratch directory")?;

        let script = tempfile::Builder::new()
            .prefix("run_")
            .suffix(&format!(".{extension}"))
            .tempfile_in(&self.scratch_dir)
            .context("failed to create scratch file")?;
        tokio::fs::write(script.path(), code)
            .await
            .context("failed to write scratch file")?;
        debug!(path = %script.path().display(), "wrote snippet to scratch file");

        let options = SandboxOptions {
            program: interpreter.to_string(),
            args: vec![script.path().to_string_lossy().into_owned()],
            current_dir: self.scratch_dir.clone(),
            timeout: self.limits.timeout,
            max_output_bytes: self.limits.max_output_bytes,
        };

        // The guard deletes the scratch file when it drops, on every exit
        // path out of this function, including sandbox failures.
        let result = self.sandbox.run(options).await;
        let output = result?;
        Ok(RunOutcome::classify(&output, self.limits.timeout))
    }
}
