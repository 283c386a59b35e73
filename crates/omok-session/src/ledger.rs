//! Win/loss persistence.
//!
//! Each finished match produces one record naming the winner and the
//! loser. Stats shown in `PLAYER_INFO` are recomputed from these
//! records on demand.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::error::StoreError;

/// One decided match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub winner: String,
    pub loser: String,
}

/// Append-only record of decided matches.
pub trait MatchLedger: Send + Sync + 'static {
    /// Records one decided match.
    fn append_result(
        &self,
        winner: &str,
        loser: &str,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn count_wins(&self, name: &str) -> impl Future<Output = Result<u32, StoreError>> + Send;

    fn count_losses(&self, name: &str) -> impl Future<Output = Result<u32, StoreError>> + Send;
}

impl<L: MatchLedger> MatchLedger for Arc<L> {
    async fn append_result(&self, winner: &str, loser: &str) -> Result<(), StoreError> {
        (**self).append_result(winner, loser).await
    }

    async fn count_wins(&self, name: &str) -> Result<u32, StoreError> {
        (**self).count_wins(name).await
    }

    async fn count_losses(&self, name: &str) -> Result<u32, StoreError> {
        (**self).count_losses(name).await
    }
}

// ------------------------------------------------------------
// In-memory ledger
// ------------------------------------------------------------

/// Volatile ledger for tests and ephemeral servers.
#[derive(Default)]
pub struct MemoryLedger {
    records: Mutex<Vec<MatchRecord>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records, oldest first.
    pub async fn records(&self) -> Vec<MatchRecord> {
        self.records.lock().await.clone()
    }
}

impl MatchLedger for MemoryLedger {
    async fn append_result(&self, winner: &str, loser: &str) -> Result<(), StoreError> {
        self.records.lock().await.push(MatchRecord {
            winner: winner.to_owned(),
            loser: loser.to_owned(),
        });
        Ok(())
    }

    async fn count_wins(&self, name: &str) -> Result<u32, StoreError> {
        let records = self.records.lock().await;
        Ok(records.iter().filter(|r| r.winner == name).count() as u32)
    }

    async fn count_losses(&self, name: &str) -> Result<u32, StoreError> {
        let records = self.records.lock().await;
        Ok(records.iter().filter(|r| r.loser == name).count() as u32)
    }
}

// ------------------------------------------------------------
// File-backed ledger
// ------------------------------------------------------------

/// Ledger persisted as one JSON object per line, appended as matches
/// finish. Counting reads the whole file; match results are rare enough
/// that this never matters.
pub struct FileLedger {
    path: PathBuf,
    // Serializes appends so concurrent writers cannot interleave lines.
    write_lock: Mutex<()>,
}

impl FileLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    async fn read_records(&self) -> Result<Vec<MatchRecord>, StoreError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<MatchRecord>(line) {
                Ok(record) => records.push(record),
                // A torn write must not poison everyone's stats.
                Err(e) => {
                    tracing::warn!(path = %self.path.display(), error = %e, "skipping corrupt ledger line");
                }
            }
        }
        Ok(records)
    }
}

impl MatchLedger for FileLedger {
    async fn append_result(&self, winner: &str, loser: &str) -> Result<(), StoreError> {
        let record = MatchRecord {
            winner: winner.to_owned(),
            loser: loser.to_owned(),
        };
        let mut line = serde_json::to_string(&record)?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    async fn count_wins(&self, name: &str) -> Result<u32, StoreError> {
        let records = self.read_records().await?;
        Ok(records.iter().filter(|r| r.winner == name).count() as u32)
    }

    async fn count_losses(&self, name: &str) -> Result<u32, StoreError> {
        let records = self.read_records().await?;
        Ok(records.iter().filter(|r| r.loser == name).count() as u32)
    }
}

// ============================================================
// Tests
// ============================================================
