//! Sandboxed execution of user-supplied code and shell commands.
//!
//! The crate is built around one seam: the [`Sandbox`] trait, whose only real
//! implementation is [`ProcessSandbox`]. Everything above it — the snippet
//! runner and the shell runner — depends on the trait, so tests can interpose
//! a spy and assert that a rejected command never reaches the operating
//! system.

pub mod code;
pub mod outcome;
pub mod process;
pub mod shell;

use async_trait::async_trait;

pub use code::{CodeRunner, Language};
pub use outcome::{RunKind, RunOutcome};
pub use process::{ProcessSandbox, SandboxOptions, SandboxOutput};
pub use shell::ShellRunner;

/// Executes one child process per call with a deadline and an output cap.
#[async_trait]
pub trait Sandbox: Send + Sync {
    async fn run(&self, options: SandboxOptions) -> anyhow::Result<SandboxOutput>;
}
