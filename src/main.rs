//! Codepad — a small file-management and code-execution server.
//!
//! Thin binary entry point: parse the CLI, load config, bootstrap the storage
//! layout, and serve the JSON API.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use codepad::config::ServerConfig;
use codepad::{server, startup};

#[derive(Parser, Debug)]
#[command(name = "codepad", version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "codepad.toml")]
    config: PathBuf,

    /// Port to listen on (overrides the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Base directory for relative storage paths
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = ServerConfig::load(&args.config)?;
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(data_dir) = &args.data_dir {
        config.storage = config.storage.clone().rebased_on(data_dir);
    }

    let state = startup::bootstrap(&config).await?;
    let addr = config.socket_addr()?;
    server::serve(addr, state).await
}
