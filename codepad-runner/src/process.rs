//! Child-process execution with a wall-clock deadline and capped capture.

use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tracing::debug;

use crate::Sandbox;

/// How long to keep draining pipes once the direct child is gone.
/// Grandchildren that inherited the pipes can keep them open indefinitely;
/// past the grace period the capture is abandoned rather than hanging the
/// caller.
const DRAIN_GRACE: Duration = Duration::from_secs(2);

/// One execution request. The working directory must already be confined by
/// the caller; no path validation happens here.
#[derive(Debug, Clone)]
pub struct SandboxOptions {
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: PathBuf,
    pub timeout: Duration,
    pub max_output_bytes: usize,
}

/// Captured result of a child process run.
#[derive(Debug)]
pub struct SandboxOutput {
    pub exit_status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub timed_out: bool,
    pub duration: Duration,
}

impl SandboxOutput {
    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// Spawns one OS process per call. Never pools or reuses children; a run that
/// exceeds its deadline is killed and reaped unconditionally. No concurrency
/// cap is imposed here.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessSandbox;

impl ProcessSandbox {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Sandbox for ProcessSandbox {
    async fn run(&self, options: SandboxOptions) -> Result<SandboxOutput> {
        let start = Instant::now();

        let mut command = Command::new(&options.program);
        command
            .args(&options.args)
            .current_dir(&options.current_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = command.spawn().with_context(|| {
            format!(
                "failed to spawn '{}' with args {:?}",
                options.program, options.args
            )
        })?;

        let stdout_pipe = child.stdout.take();
        let stderr_pipe = child.stderr.take();
        let cap = options.max_output_bytes;
        let stdout_task = tokio::spawn(read_capped(stdout_pipe, cap));
        let stderr_task = tokio::spawn(read_capped(stderr_pipe, cap));

        let (exit_status, timed_out) =
            match tokio::time::timeout(options.timeout, child.wait()).await {
                Ok(status) => (status.context("failed to wait for child")?, false),
                Err(_) => {
                    debug!(
                        program = %options.program,
                        timeout_ms = options.timeout.as_millis() as u64,
                        "deadline exceeded; killing child"
                    );
                    child.kill().await.context("failed to kill timed-out child")?;
                    let status = child.wait().await.context("failed to reap killed child")?;
                    (status, true)
                }
            };

        let stdout = drain(stdout_task).await?;
        let stderr = drain(stderr_task).await?;

        Ok(SandboxOutput {
            exit_status,
            stdout,
            stderr,
            timed_out,
            duration: start.elapsed(),
        })
    }
}

/// Read a pipe to EOF, retaining at most `max_bytes`. The stream is always
/// drained fully so a chatty child is never blocked on a full pipe.
async fn read_capped<R>(reader: Option<R>, max_bytes: usize) -> Result<Vec<u8>>
where
    R: tokio::io::AsyncRead + Unpin + Send,
{
    let mut reader = match reader {
        Some(reader) => reader,
        None => return Ok(Vec::new()),
    };

    let mut output = Vec::new();
    let mut buffer = [0u8; 4096];
    loop {
        let read = reader.read(&mut buffer).await?;
        if read == 0 {
            break;
        }
        let remaining = max_bytes.saturating_sub(output.len());
        if remaining > 0 {
            let to_copy = remaining.min(read);
            output.extend_from_slice(&buffer[..to_copy]);
        }
    }
    Ok(output)
}

async fn drain(task: tokio::task::JoinHandle<Result<Vec<u8>>>) -> Result<Vec<u8>> {
    match tokio::time::timeout(DRAIN_GRACE, task).await {
        Ok(joined) => joined.context("output reader task failed")?,
        Err(_) => Ok(Vec::new()),
    }
}
