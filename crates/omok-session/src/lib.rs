//! Session coordination for the Omok match server.
//!
//! This crate owns everything that happens between "a client
//! authenticated" and "bytes go out on a socket":
//!
//! 1. **Slots** ([`SlotTable`]) — the two player seats, bound to a
//!    display name and an outbound channel while a client is connected.
//! 2. **The coordinator** ([`spawn_session`], [`SessionHandle`]) — an
//!    actor task that owns the match state, the turn timer, the rematch
//!    negotiation and the chat history. Every state-mutating operation
//!    runs on this one task, which is the session-wide serialization
//!    boundary: two simultaneous moves can never both read "my turn"
//!    before either writes.
//! 3. **Collaborators** ([`AccountStore`], [`MatchLedger`]) — trait
//!    seams for credential checks and win/loss persistence. The
//!    coordinator calls them best-effort; a failing store never takes
//!    the session down.
//!
//! # How it fits in the stack
//!
//! ```text
//! Server / handlers (above)  ← one task per connection, sends commands
//!     ↕
//! Session layer (this crate) ← single actor task, owns all match state
//!     ↕
//! Game + timer (below)       ← pure rules, countdown
//! ```

#![allow(async_fn_in_trait)]

mod auth;
mod chat;
mod coordinator;
mod error;
mod ledger;
mod rematch;
mod slots;

pub use auth::{AccountStore, FileAccounts, MemoryAccounts};
pub use chat::ChatHistory;
pub use coordinator::{spawn_session, SessionCommand, SessionConfig, SessionHandle};
pub use error::{SessionError, StoreError};
pub use ledger::{FileLedger, MatchLedger, MatchRecord, MemoryLedger};
pub use rematch::{RematchRequest, RematchState};
pub use slots::{OutboundSender, PlayerSeat, SlotTable};
