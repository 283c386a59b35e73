//! # Omok
//!
//! A live two-player Omok (five-in-a-row) match server.
//!
//! The server coordinates exactly one match at a time: two seats, a
//! 15×15 board with exact-five win detection, a per-turn countdown,
//! chat relay, win/loss records, and a rematch handshake — all over a
//! persistent WebSocket connection speaking a line-oriented text
//! protocol.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use omok::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), OmokError> {
//!     let server = OmokServerBuilder::new()
//!         .bind("127.0.0.1:5000")
//!         .build(MemoryAccounts::new(), MemoryLedger::new())
//!         .await?;
//!     server.run().await
//! }
//! ```

mod error;
mod handler;
mod server;

pub use error::OmokError;
pub use server::{OmokServer, OmokServerBuilder};

/// Everything needed to stand up a server in one import.
pub mod prelude {
    pub use crate::{OmokError, OmokServer, OmokServerBuilder};
    pub use omok_game::BOARD_SIZE;
    pub use omok_protocol::{ClientMessage, ServerMessage, Slot};
    pub use omok_session::{
        FileAccounts, FileLedger, MemoryAccounts, MemoryLedger, SessionConfig,
    };
    pub use omok_timer::TimerConfig;
}
