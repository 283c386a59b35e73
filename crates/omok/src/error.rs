//! Unified error type for the Omok server.

use omok_protocol::ProtocolError;
use omok_session::{SessionError, StoreError};
use omok_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `omok` meta-crate, you deal with this single error
/// type instead of importing errors from each sub-crate. The `#[from]`
/// attribute on each variant auto-generates `From` impls, so the `?`
/// operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum OmokError {
    /// A transport-level error (accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (unparseable message).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A session-level error (server full, coordinator gone).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// An account store or ledger error.
    #[error(transparent)]
    Store(#[from] StoreError),
}
