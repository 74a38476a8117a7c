//! File-based secrets example

use layerconf::{ChainProvider, EnvProvider, MemoryProvider};
use std::io::Write;
use tempfile::NamedTempFile;

fn main() -> anyhow::Result<()> {
    // Save API key to file
    let mut api_key_file = NamedTempFile::new()?;
    writeln!(api_key_file, "super_secret_api_key_12345")?;

    // Save database password to file
    let mut db_password_file = NamedTempFile::new()?;
    writeln!(db_password_file, "db_password_67890")?;

    // Set environment variables (with _FILE suffix)
    std::env::set_var("APP_API_KEY_FILE", api_key_file.path());
    std::env::set_var("APP_DATABASE_PASSWORD_FILE", db_password_file.path());
    std::env::set_var("APP_DATABASE_HOST", "db.internal");

    let config = ChainProvider::builder()
        .with(EnvProvider::new().with_prefix("APP_").with_file_secrets())
        .with(MemoryProvider::new().with("DATABASE_HOST", "localhost"))
        .build();

    println!("Configuration loaded from files:");
    println!("  API Key: {}", config.require_string("API_KEY"));
    println!("  Database Password: {}", config.require_string("DATABASE_PASSWORD"));
    println!("  Database Host: {}", config.require_string("DATABASE_HOST"));

    Ok(())
}
