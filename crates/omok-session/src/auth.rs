//! Credential storage behind the `AUTH` command.

use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::StoreError;

/// Storage for player credentials.
///
/// Both operations return `Ok(false)` for the "valid request, wrong
/// answer" cases (name taken, bad password) and reserve `Err` for the
/// store itself failing.
pub trait AccountStore: Send + Sync + 'static {
    /// Creates the account if the name is free.
    fn register(
        &self,
        user: &str,
        pass: &str,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Checks a name/password pair against the store.
    fn authenticate(
        &self,
        user: &str,
        pass: &str,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;
}

impl<S: AccountStore> AccountStore for Arc<S> {
    async fn register(&self, user: &str, pass: &str) -> Result<bool, StoreError> {
        (**self).register(user, pass).await
    }

    async fn authenticate(&self, user: &str, pass: &str) -> Result<bool, StoreError> {
        (**self).authenticate(user, pass).await
    }
}

// ------------------------------------------------------------
// In-memory store
// ------------------------------------------------------------

/// Volatile account store for tests and ephemeral servers.
#[derive(Default)]
pub struct MemoryAccounts {
    accounts: Mutex<HashMap<String, String>>,
}

impl MemoryAccounts {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountStore for MemoryAccounts {
    async fn register(&self, user: &str, pass: &str) -> Result<bool, StoreError> {
        let mut accounts = self.accounts.lock().await;
        if accounts.contains_key(user) {
            return Ok(false);
        }
        accounts.insert(user.to_owned(), pass.to_owned());
        Ok(true)
    }

    async fn authenticate(&self, user: &str, pass: &str) -> Result<bool, StoreError> {
        let accounts = self.accounts.lock().await;
        Ok(accounts.get(user).is_some_and(|stored| stored == pass))
    }
}

// ------------------------------------------------------------
// File-backed store
// ------------------------------------------------------------

/// Account store persisted as `name:password` lines.
///
/// The whole file is loaded once at startup and rewritten on every
/// registration. Fine at this scale; the server holds two players.
pub struct FileAccounts {
    path: PathBuf,
    accounts: Mutex<HashMap<String, String>>,
}

impl FileAccounts {
    /// Loads the store from `path`. A missing file starts empty.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let mut accounts = HashMap::new();

        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => {
                for line in contents.lines() {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    match line.split_once(':') {
                        Some((user, pass)) => {
                            accounts.insert(user.to_owned(), pass.to_owned());
                        }
                        None => {
                            tracing::warn!(path = %path.display(), line, "skipping malformed account line");
                        }
                    }
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        tracing::info!(path = %path.display(), count = accounts.len(), "loaded account store");
        Ok(Self {
            path,
            accounts: Mutex::new(accounts),
        })
    }

    async fn persist(&self, accounts: &HashMap<String, String>) -> Result<(), StoreError> {
        let mut lines: Vec<String> = accounts
            .iter()
            .map(|(user, pass)| format!("{user}:{pass}"))
            .collect();
        lines.sort();
        let mut contents = lines.join("\n");
        if !contents.is_empty() {
            contents.push('\n');
        }
        tokio::fs::write(&self.path, contents).await?;
        Ok(())
    }
}

impl AccountStore for FileAccounts {
    async fn register(&self, user: &str, pass: &str) -> Result<bool, StoreError> {
        // A colon in the name would corrupt the line format.
        if user.contains(':') {
            return Ok(false);
        }
        let mut accounts = self.accounts.lock().await;
        if accounts.contains_key(user) {
            return Ok(false);
        }
        accounts.insert(user.to_owned(), pass.to_owned());
        self.persist(&accounts).await?;
        tracing::info!(user, "registered account");
        Ok(true)
    }

    async fn authenticate(&self, user: &str, pass: &str) -> Result<bool, StoreError> {
        let accounts = self.accounts.lock().await;
        Ok(accounts.get(user).is_some_and(|stored| stored == pass))
    }
}

// ============================================================
// Tests
// ============================================================
