//! Server configuration: `codepad.toml` with serde defaults and CLI
//! overrides applied by `main`.

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use codepad_runner::code::CodeLimits;
use codepad_runner::shell::ShellLimits;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageConfig,
    pub limits: LimitsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            storage: StorageConfig::default(),
            limits: LimitsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub projects_dir: PathBuf,
    pub scratch_dir: PathBuf,
    pub secrets_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            projects_dir: PathBuf::from("projects"),
            scratch_dir: PathBuf::from("scratch"),
            secrets_dir: PathBuf::from("secrets"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub run_timeout_secs: u64,
    pub run_max_output_bytes: usize,
    pub shell_timeout_secs: u64,
    pub shell_max_output_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            run_timeout_secs: 10,
            run_max_output_bytes: 1024 * 1024,
            shell_timeout_secs: 30,
            shell_max_output_bytes: 5 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// Load configuration from `path`. A missing file yields the defaults; a
    /// present but malformed file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .with_context(|| format!("invalid listen host '{}'", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn code_limits(&self) -> CodeLimits {
        CodeLimits {
            timeout: Duration::from_secs(self.limits.run_timeout_secs),
            max_output_bytes: self.limits.run_max_output_bytes,
        }
    }

    pub fn shell_limits(&self) -> ShellLimits {
        ShellLimits {
            timeout: Duration::from_secs(self.limits.shell_timeout_secs),
            max_output_bytes: self.limits.shell_max_output_bytes,
        }
    }
}

impl StorageConfig {
    /// Rebase relative storage directories onto `base`. Absolute paths are
    /// left alone.
    pub fn rebased_on(self, base: &Path) -> Self {
        let rebase = |dir: PathBuf| {
            if dir.is_absolute() {
                dir
            } else {
                base.join(dir)
            }
        };
        Self {
            projects_dir: rebase(self.projects_dir),
            scratch_dir: rebase(self.scratch_dir),
            secrets_dir: rebase(self.secrets_dir),
        }
    }
}
