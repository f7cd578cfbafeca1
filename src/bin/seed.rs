//! Idempotent API key provisioning.
//!
//! Keys are never created through the public API; this binary is the
//! out-of-band provisioning path. It ensures a key with the given name
//! exists (creating one with a fresh token if needed) and prints the token.
//!
//! # Usage
//!
//! ```text
//! cargo run --bin seed              # provisions "Development Key"
//! cargo run --bin seed "CI Key"     # provisions a named key
//! ```

use message_board_server::{config::Config, db, store::PgStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let pool = db::create_pool(&config.database_url).await?;
    db::run_migrations(&pool).await?;

    let store = PgStore::new(pool);

    let name = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Development Key".to_string());

    // Idempotent: re-running prints the existing key instead of minting
    // another one
    let key = match store.find_key_by_name(&name).await? {
        Some(existing) => existing,
        None => store.create_key(&name, None).await?,
    };

    println!("API Key: {}", key.token);
    println!("(Use this in the X-API-Key header for API requests)");

    Ok(())
}
