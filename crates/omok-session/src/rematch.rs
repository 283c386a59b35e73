//! Rematch handshake state machine.
//!
//! A rematch needs both players to ask for it. The first `RESET` opens
//! a pending request; the opponent's `RESET` accepts it; a disconnect
//! cancels it. A repeat `RESET` from the original requester is a no-op
//! the caller reports back.

use omok_protocol::Slot;

/// Current negotiation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RematchState {
    #[default]
    Idle,
    Pending {
        requester: Slot,
    },
}

/// Outcome of a `RESET` arriving while both seats are occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RematchRequest {
    /// No request was pending; this one opened it.
    Opened,
    /// The same player asked again while their request is pending.
    AlreadyPending,
    /// The opponent of the pending requester agreed; handshake done.
    Accepted,
}

impl RematchState {
    /// Applies a rematch request from `slot` and reports what happened.
    /// On [`RematchRequest::Accepted`] the state returns to idle.
    pub fn request(&mut self, slot: Slot) -> RematchRequest {
        match *self {
            RematchState::Idle => {
                *self = RematchState::Pending { requester: slot };
                RematchRequest::Opened
            }
            RematchState::Pending { requester } if requester == slot => {
                RematchRequest::AlreadyPending
            }
            RematchState::Pending { .. } => {
                *self = RematchState::Idle;
                RematchRequest::Accepted
            }
        }
    }

    /// Drops any pending request, returning who had opened it.
    pub fn cancel(&mut self) -> Option<Slot> {
        match std::mem::take(self) {
            RematchState::Idle => None,
            RematchState::Pending { requester } => Some(requester),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, RematchState::Pending { .. })
    }
}

// ============================================================
// Tests
// ============================================================
