//! A missing required key halts the calling flow

use layerconf::{ChainProvider, MemoryProvider};

fn main() {
    let config = ChainProvider::builder()
        .with(MemoryProvider::new().with("HOST", "localhost"))
        .build();

    println!("Host: {}", config.require_string("HOST"));

    // Panics: "could not resolve config key 'DB_PASSWORD': every provider
    // failed (reported at position 0): config value with key 'DB_PASSWORD' could
    // not be found"
    let password = config.require_string("DB_PASSWORD");
    println!("unreachable: {password}");
}
