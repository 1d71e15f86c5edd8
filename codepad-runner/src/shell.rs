//! Shell command execution behind a best-effort denylist.
//!
//! The denylist is plain substring containment against the raw command text.
//! It stops the obvious catastrophes (`rm -rf /`, disk formatting, fork
//! bombs) cheaply and before anything is spawned, but it is NOT a sandbox:
//! pipes, subshells, quoting, and encodings all walk straight past it. That
//! limitation is deliberate and documented rather than papered over; real
//! containment would need OS-level isolation.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::warn;

use crate::outcome::{RunKind, RunOutcome};
use crate::process::SandboxOptions;
use crate::Sandbox;

pub const BLOCKED_MESSAGE: &str = "This command is not allowed.";
pub const EMPTY_MESSAGE: &str = "No command provided.";

/// Known-catastrophic substrings. Matching is containment on the raw text.
const DENYLIST: &[&str] = &[
    "rm -rf /",
    "rm -fr /",
    ":(){:|:&};:",
    ":(){ :|:& };:",
    "mkfs",
    "dd if=/dev/zero of=/dev/",
    "dd of=/dev/sd",
    "> /dev/sda",
];

/// Returns the denylist entry a command matches, if any.
pub fn denied_pattern(raw: &str) -> Option<&'static str> {
    DENYLIST.iter().copied().find(|pattern| raw.contains(pattern))
}

/// Execution limits for one shell run. Wider than snippet limits because
/// shell commands legitimately cover builds and installs.
#[derive(Debug, Clone, Copy)]
pub struct ShellLimits {
    pub timeout: Duration,
    pub max_output_bytes: usize,
}

impl Default for ShellLimits {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_output_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Runs raw shell commands through the sandbox, bound to a caller-confined
/// working directory. Keeps no history.
pub struct ShellRunner {
    sandbox: Arc<dyn Sandbox>,
    limits: ShellLimits,
}

impl ShellRunner {
    pub fn new(sandbox: Arc<dyn Sandbox>) -> Self {
        Self {
            sandbox,
            limits: ShellLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: ShellLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Run `raw` with `working_dir` as cwd. The working directory must
    /// already have passed path confinement; this runner does not validate
    /// it.
    pub async fn run(&self, raw: &str, working_dir: PathBuf) -> Result<RunOutcome> {
        if raw.trim().is_empty() {
            return Ok(RunOutcome::new(RunKind::Empty, EMPTY_MESSAGE));
        }

        if let Some(pattern) = denied_pattern(raw) {
            warn!(%pattern, "blocked denylisted shell command");
            return Ok(RunOutcome::error(BLOCKED_MESSAGE));
        }

        let options = SandboxOptions {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), raw.to_string()],
            current_dir: working_dir,
            timeout: self.limits.timeout,
            max_output_bytes: self.limits.max_output_bytes,
        };
        let output = self.sandbox.run(options).await?;
        Ok(RunOutcome::classify(&output, self.limits.timeout))
    }
}
