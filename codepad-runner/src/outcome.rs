//! Deterministic classification of execution results.

use std::time::Duration;

use serde::Serialize;

use crate::process::SandboxOutput;

pub const NO_OUTPUT_MESSAGE: &str = "Program executed successfully with no output.";

/// Discriminator carried to the client in the `type` field. Execution
/// endpoints always answer HTTP 200; callers branch on this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunKind {
    Success,
    Error,
    Timeout,
    Empty,
    Info,
    Html,
}

/// Outcome of a code or shell run: a classification plus the text to show.
/// For [`RunKind::Html`] the output is the raw markup for the preview panel.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RunOutcome {
    #[serde(rename = "type")]
    pub kind: RunKind,
    pub output: String,
}

impl RunOutcome {
    pub fn new(kind: RunKind, output: impl Into<String>) -> Self {
        Self {
            kind,
            output: output.into(),
        }
    }

    pub fn error(output: impl Into<String>) -> Self {
        Self::new(RunKind::Error, output)
    }

    pub fn info(output: impl Into<String>) -> Self {
        Self::new(RunKind::Info, output)
    }

    /// Classify a finished child process, in priority order: deadline
    /// exceeded, then error (non-zero exit or anything on stderr), then empty,
    /// then success.
    pub fn classify(output: &SandboxOutput, deadline: Duration) -> Self {
        if output.timed_out {
            return Self::new(
                RunKind::Timeout,
                format!("Execution timed out ({} second limit)", deadline.as_secs()),
            );
        }

        let stdout = output.stdout_lossy();
        let stderr = output.stderr_lossy();

        if !output.exit_status.success() || !stderr.trim().is_empty() {
            let message = if stderr.trim().is_empty() {
                format!("process exited with {}", output.exit_status)
            } else {
                stderr
            };
            return Self::error(message);
        }

        if stdout.trim().is_empty() {
            return Self::new(RunKind::Empty, NO_OUTPUT_MESSAGE);
        }

        Self::new(RunKind::Success, stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::process::ExitStatusExt;
    use std::process::ExitStatus;

    fn output(code: i32, stdout: &str, stderr: &str, timed_out: bool) -> SandboxOutput {
        SandboxOutput {
            exit_status: ExitStatus::from_raw(code << 8),
            stdout: stdout.as_bytes().to_vec(),
            stderr: stderr.as_bytes().to_vec(),
            timed_out,
            duration: Duration::from_millis(1),
        }
    }

    #[test]
    fn timeout_wins_over_everything() {
        let out = output(1, "partial", "boom", true);
        let outcome = RunOutcome::classify(&out, Duration::from_secs(10));
        assert_eq!(outcome.kind, RunKind::Timeout);
        assert!(outcome.output.contains("10 second limit"));
    }

    #[test]
    fn stderr_text_becomes_the_error_message() {
        let out = output(1, "", "SyntaxError: unexpected token", false);
        let outcome = RunOutcome::classify(&out, Duration::from_secs(10));
        assert_eq!(outcome.kind, RunKind::Error);
        assert!(outcome.output.contains("SyntaxError"));
    }

    #[test]
    fn stderr_on_zero_exit_is_still_an_error() {
        let out = output(0, "output", "warning-as-error", false);
        let outcome = RunOutcome::classify(&out, Duration::from_secs(10));
        assert_eq!(outcome.kind, RunKind::Error);
    }

    #[test]
    fn nonzero_exit_without_stderr_describes_the_exit() {
        let out = output(7, "", "", false);
        let outcome = RunOutcome::classify(&out, Duration::from_secs(10));
        assert_eq!(outcome.kind, RunKind::Error);
        assert!(outcome.output.contains("exited"));
    }

    #[test]
    fn silent_success_is_empty() {
        let out = output(0, "", "", false);
        let outcome = RunOutcome::classify(&out, Duration::from_secs(10));
        assert_eq!(outcome.kind, RunKind::Empty);
        assert_eq!(outcome.output, NO_OUTPUT_MESSAGE);
    }

    #[test]
    fn stdout_success() {
        let out = output(0, "Hello\n", "", false);
        let outcome = RunOutcome::classify(&out, Duration::from_secs(10));
        assert_eq!(outcome.kind, RunKind::Success);
        assert_eq!(outcome.output, "Hello\n");
    }

    #[test]
    fn kind_serializes_lowercase() {
        let json = serde_json::to_string(&RunOutcome::error("x")).expect("json");
        assert!(json.contains("\"type\":\"error\""));
    }
}
