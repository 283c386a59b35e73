//! `omokd` — the Omok match server daemon.
//!
//! Configuration comes from the environment:
//! - `OMOK_ADDR`: listen address (default `127.0.0.1:5000`)
//! - `OMOK_ACCOUNTS`: account file path (default `accounts.txt`)
//! - `OMOK_RECORD`: match record file path (default `record.jsonl`)
//! - `RUST_LOG`: log filter (default `info`)

use omok::{OmokError, OmokServerBuilder};
use omok_session::{FileAccounts, FileLedger};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), OmokError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let addr = std::env::var("OMOK_ADDR").unwrap_or_else(|_| "127.0.0.1:5000".to_string());
    let accounts_path =
        std::env::var("OMOK_ACCOUNTS").unwrap_or_else(|_| "accounts.txt".to_string());
    let record_path = std::env::var("OMOK_RECORD").unwrap_or_else(|_| "record.jsonl".to_string());

    let accounts = FileAccounts::load(&accounts_path).await?;
    let ledger = FileLedger::new(&record_path);

    let server = OmokServerBuilder::new()
        .bind(&addr)
        .build(accounts, ledger)
        .await?;
    match server.local_addr() {
        Ok(addr) => tracing::info!(%addr, "omokd listening"),
        Err(_) => tracing::info!("omokd listening"),
    }

    server.run().await
}
