//! Error types for the session layer.

/// Errors that can occur when talking to the session coordinator.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Both player seats are occupied. The connection is told
    /// `SERVER_FULL` and closed.
    #[error("no free player slot")]
    ServerFull,

    /// The coordinator task is gone (command channel closed). Only
    /// happens during shutdown.
    #[error("session coordinator unavailable")]
    Unavailable,
}

/// Errors from the account store and match ledger collaborators.
///
/// These are swallowed at the boundary: callers log them and carry on,
/// because gameplay must not depend on persistence succeeding.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted record failed to parse.
    #[error("corrupt record: {0}")]
    Corrupt(#[from] serde_json::Error),
}
