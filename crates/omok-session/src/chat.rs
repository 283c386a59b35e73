//! Bounded chat history, replayed to late joiners.

use std::collections::VecDeque;

use omok_protocol::ServerMessage;

/// Ring of the most recent chat broadcasts. When the cap is reached the
/// oldest entry is evicted.
pub struct ChatHistory {
    entries: VecDeque<ServerMessage>,
    cap: usize,
}

impl ChatHistory {
    pub fn new(cap: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(cap),
            cap,
        }
    }

    pub fn push(&mut self, message: ServerMessage) {
        if self.entries.len() == self.cap {
            self.entries.pop_front();
        }
        self.entries.push_back(message);
    }

    /// Entries oldest-first, the order they should be replayed in.
    pub fn iter(&self) -> impl Iterator<Item = &ServerMessage> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================
// Tests
// ============================================================
