//! Wire protocol for the Omok match server.
//!
//! This crate defines the "language" that clients and the server speak:
//!
//! - **Types** ([`Slot`], [`AuthMode`], [`PlayerStats`]) — the small
//!   identity and payload types that appear inside messages.
//! - **Messages** ([`ClientMessage`], [`ServerMessage`]) — one closed
//!   enum per direction, one variant per message kind. Inbound text is
//!   parsed once into a variant and then matched exhaustively; there is
//!   no string-prefix branching anywhere above this crate.
//! - **Errors** ([`ProtocolError`]) — what can go wrong while parsing.
//!
//! # Wire format
//!
//! One discrete UTF-8 text message per logical event, space-delimited
//! command word plus arguments (`MOVE 7 7`, `AUTH LOGIN alice secret`).
//! Framing — delivering each message whole, never split or merged — is
//! the transport's job; this crate only sees complete lines.

mod error;
mod message;
mod types;

pub use error::ProtocolError;
pub use message::{ClientMessage, ServerMessage};
pub use types::{AuthMode, PlayerStats, Slot};
