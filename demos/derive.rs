//! Loading a struct from a provider chain

use layerconf::{ChainProvider, FileProvider, LayerConf, MemoryProvider};
use std::fs;

fn comma_separated(s: &str) -> Result<Vec<String>, String> {
    Ok(s.split(',').map(|s| s.trim().to_string()).collect())
}

#[derive(Debug, LayerConf)]
#[conf(prefix = "APP_")]
struct Config {
    // Required: APP_DATABASE_URL
    pub database_url: String,

    // With default value
    #[conf(default = 10)]
    pub max_connections: u32,

    // Default::default() when missing
    #[conf(default)]
    pub debug_mode: bool,

    // Custom key: APP_RATE
    #[conf(name = "RATE")]
    pub sample_rate: f64,

    // None when missing
    pub api_key: Option<String>,

    // Custom deserializer
    #[conf(deserializer = "comma_separated")]
    pub allowed_origins: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    fs::write(
        dir.path().join("app.env"),
        "APP_DATABASE_URL=postgres://localhost/mydb\nAPP_ALLOWED_ORIGINS=a.com, b.com\n",
    )?;

    let provider = ChainProvider::builder()
        .with(FileProvider::new(dir.path(), "app.env"))
        .with(MemoryProvider::new().with("APP_RATE", "0.25"))
        .build();

    let config = Config::from_provider(&provider)?;

    println!("Configuration loaded:");
    println!("  Database URL: {}", config.database_url);
    println!("  Max Connections: {}", config.max_connections);
    println!("  Debug Mode: {}", config.debug_mode);
    println!("  Sample Rate: {}", config.sample_rate);
    println!("  API Key: {:?}", config.api_key);
    println!("  Allowed Origins: {:?}", config.allowed_origins);

    Ok(())
}
