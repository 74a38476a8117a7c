//! Basic usage example

use layerconf::{FileProvider, Provider};
use std::io::Write;

fn main() -> anyhow::Result<()> {
    // Write a config file for demonstration
    let dir = tempfile::tempdir()?;
    let mut file = std::fs::File::create(dir.path().join("app.env"))?;
    writeln!(file, "HOST=localhost")?;
    writeln!(file, "PORT=8080")?;
    writeln!(file, "DEBUG=true")?;

    // Relative paths are resolved against the directory given here
    let provider = FileProvider::new(dir.path(), "app.env");

    println!("Configuration loaded from {}:", provider.path().display());
    println!("  Host: {}", provider.get_string("HOST")?);
    println!("  Port: {}", provider.get_float("PORT")?);
    println!("  Debug: {}", provider.get_bool("DEBUG")?);

    // Unknown keys are ordinary errors at the provider level
    if let Err(e) = provider.get_string("MISSING") {
        println!("  Missing: {e}");
    }

    Ok(())
}
