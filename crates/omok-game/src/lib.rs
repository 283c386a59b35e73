//! Board rules and match state for the Omok match server.
//!
//! Two layers, split the same way the rules/state seam runs:
//!
//! - [`rules`] — pure functions over a grid snapshot: exact-five win
//!   detection (an overline of six or more is *not* a win), the
//!   double-three forbidden-move check for the first mover, and the
//!   full-board draw condition. No hidden state, no I/O.
//! - [`MatchState`] — the single mutable match: grid, turn pointer and
//!   phase. It owns every rule-engine call; callers never touch the
//!   grid directly. All mutation happens through
//!   [`MatchState::attempt_move`], [`MatchState::reset`],
//!   [`MatchState::clear_to_waiting`] and
//!   [`MatchState::force_turn_switch`].

mod grid;
pub mod rules;
mod state;

pub use grid::{Grid, Stone, BOARD_SIZE};
pub use state::{MatchState, MoveOutcome, Phase, RejectReason};
