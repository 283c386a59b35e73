//! The mutable match: grid, turn pointer, phase.

use std::fmt;

use omok_protocol::Slot;

use crate::grid::{Grid, Stone};
use crate::rules;

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// The lifecycle phase of the match.
///
/// ```text
/// Waiting ──(both seats filled)──→ Active ──(win/draw)──→ Over
///    ↑                                │                     │
///    └──────(a player leaves)─────────┴──(rematch accepted)─┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Fewer than two players; no match in progress.
    Waiting,
    /// Match in progress, moves are accepted.
    Active,
    /// A win or draw was reached; rematch negotiation may begin.
    Over,
}

impl Phase {
    /// `true` while moves and timeouts are accepted.
    pub fn is_active(self) -> bool {
        matches!(self, Phase::Active)
    }

    /// `true` once a win or draw has been reached.
    pub fn is_over(self) -> bool {
        matches!(self, Phase::Over)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Waiting => write!(f, "waiting"),
            Phase::Active => write!(f, "active"),
            Phase::Over => write!(f, "over"),
        }
    }
}

// ---------------------------------------------------------------------------
// Move outcomes
// ---------------------------------------------------------------------------

/// Why a move was not applied.
///
/// Rejections are ordinary outcomes, not errors: the server drops the
/// move silently (client-side prevention is expected), so these mostly
/// feed debug logs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RejectReason {
    /// Coordinates outside the 15×15 board.
    #[error("coordinates out of range")]
    OutOfRange,
    /// The target cell already holds a stone.
    #[error("cell is occupied")]
    Occupied,
    /// The sender is not the current turn holder.
    #[error("not this seat's turn")]
    NotYourTurn,
    /// No match is in progress.
    #[error("match is not active")]
    NotActive,
    /// The placement is a double-three, forbidden for the first mover.
    #[error("forbidden double-three")]
    Forbidden,
}

/// The result of [`MatchState::attempt_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move was refused; nothing changed.
    Rejected(RejectReason),
    /// The stone was placed and the turn flipped.
    Placed,
    /// The stone was placed and completed exactly five; phase is now
    /// [`Phase::Over`].
    PlacedAndWon,
    /// The stone was placed, filling the board with no winner; phase is
    /// now [`Phase::Over`].
    PlacedAndDrew,
}

// ---------------------------------------------------------------------------
// MatchState
// ---------------------------------------------------------------------------

/// The single mutable match owned by the session coordinator.
///
/// All rule-engine calls go through here; the coordinator serializes
/// access, so this type needs no interior locking of its own.
#[derive(Debug, Clone)]
pub struct MatchState {
    grid: Grid,
    turn: Slot,
    phase: Phase,
}

impl MatchState {
    /// A fresh match in the waiting phase.
    pub fn new() -> MatchState {
        MatchState {
            grid: Grid::new(),
            turn: Slot::ONE,
            phase: Phase::Waiting,
        }
    }

    /// The current turn holder.
    pub fn turn(&self) -> Slot {
        self.turn
    }

    /// The current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The board, read-only.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Validates and applies one move request.
    ///
    /// Rejects when the match is not active, the coordinates are out of
    /// range, the cell is occupied, the sender is not the turn holder,
    /// or the placement is a forbidden double-three (first mover only).
    /// On acceptance the stone is written; a completed exact-five
    /// transitions to [`Phase::Over`] and reports
    /// [`MoveOutcome::PlacedAndWon`], a full board reports
    /// [`MoveOutcome::PlacedAndDrew`], and otherwise the turn flips.
    pub fn attempt_move(&mut self, x: u8, y: u8, slot: Slot) -> MoveOutcome {
        if !self.phase.is_active() {
            return MoveOutcome::Rejected(RejectReason::NotActive);
        }
        if !Grid::in_bounds(i32::from(x), i32::from(y)) {
            return MoveOutcome::Rejected(RejectReason::OutOfRange);
        }
        if !self.grid.is_empty_at(i32::from(x), i32::from(y)) {
            return MoveOutcome::Rejected(RejectReason::Occupied);
        }
        if slot != self.turn {
            return MoveOutcome::Rejected(RejectReason::NotYourTurn);
        }

        let stone = Stone::for_slot(slot);
        if rules::is_forbidden(&self.grid, x, y, stone) {
            return MoveOutcome::Rejected(RejectReason::Forbidden);
        }

        self.grid.place(x, y, stone);

        if rules::would_win(&self.grid, x, y, stone) {
            self.phase = Phase::Over;
            MoveOutcome::PlacedAndWon
        } else if rules::is_full(&self.grid) {
            self.phase = Phase::Over;
            MoveOutcome::PlacedAndDrew
        } else {
            self.turn = self.turn.other();
            MoveOutcome::Placed
        }
    }

    /// Clears the grid and starts a new match: slot 1 to move (the
    /// fixed starting player — no swap rule), phase active.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.turn = Slot::ONE;
        self.phase = Phase::Active;
    }

    /// Clears the grid and returns to the waiting phase (a player left
    /// mid-series).
    pub fn clear_to_waiting(&mut self) {
        self.grid.clear();
        self.turn = Slot::ONE;
        self.phase = Phase::Waiting;
    }

    /// Flips the turn without placing a stone (turn timeout). No-op
    /// unless the match is active.
    pub fn force_turn_switch(&mut self) {
        if self.phase.is_active() {
            self.turn = self.turn.other();
        }
    }
}

impl Default for MatchState {
    fn default() -> Self {
        MatchState::new()
    }
}

// =========================================================================
// Tests
// =========================================================================
