//! Layered configuration with the error handled at the process boundary
//!
//! Run with `RUST_LOG=layerconf=debug` to watch the chain fall through.

use layerconf::{ChainProvider, EnvProvider, FileProvider, MemoryProvider, Provider};
use std::fs;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("defaults.env"), "HOST=localhost\nPORT=8080\nDEBUG=false\n")?;
    fs::write(dir.path().join("deploy.env"), "HOST=api.example.com\n")?;
    // local.env is optional and deliberately absent

    let config = ChainProvider::builder()
        .with(EnvProvider::new().with_prefix("LAYERED_"))
        .with(FileProvider::new(dir.path(), "local.env"))
        .with(FileProvider::new(dir.path(), "deploy.env"))
        .with(FileProvider::new(dir.path(), "defaults.env"))
        .build();

    println!("Resolved configuration:");
    println!("  Host: {}", config.get_string("HOST")?);
    println!("  Port: {}", config.get_float("PORT")?);
    println!("  Debug: {}", config.get_bool("DEBUG")?);

    // Unresolvable keys propagate to main, which prints the cause chain and
    // exits with a non-zero status.
    let timeout = config.get_float("TIMEOUT")?;
    println!("  Timeout: {timeout}");

    Ok(())
}
