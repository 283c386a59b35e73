//! The two player seats.

use omok_protocol::{ServerMessage, Slot};
use tokio::sync::mpsc;

/// Channel used to push outbound messages toward a connection's writer
/// task. Unbounded: the coordinator must never block on a slow client.
pub type OutboundSender = mpsc::UnboundedSender<ServerMessage>;

/// A claimed seat: the player's display name plus the outbound channel
/// for their connection.
pub struct PlayerSeat {
    pub name: String,
    pub sender: OutboundSender,
}

/// Fixed pool of two seats, indexed by [`Slot`].
///
/// Seat 1 is always preferred when both are free, so after a full
/// disconnect the next pair of players comes back as 1 and 2 again.
#[derive(Default)]
pub struct SlotTable {
    seats: [Option<PlayerSeat>; 2],
}

impl SlotTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the lowest free seat, or `None` when both are taken.
    pub fn allocate(&mut self, name: String, sender: OutboundSender) -> Option<Slot> {
        let index = self.seats.iter().position(Option::is_none)?;
        self.seats[index] = Some(PlayerSeat { name, sender });
        Slot::new(index as u8 + 1)
    }

    /// Frees a seat, returning its occupant. Releasing an already-free
    /// seat returns `None`, which makes double-leaves harmless.
    pub fn release(&mut self, slot: Slot) -> Option<PlayerSeat> {
        self.seats[seat_index(slot)].take()
    }

    pub fn get(&self, slot: Slot) -> Option<&PlayerSeat> {
        self.seats[seat_index(slot)].as_ref()
    }

    pub fn name(&self, slot: Slot) -> Option<&str> {
        self.get(slot).map(|seat| seat.name.as_str())
    }

    pub fn occupied(&self) -> usize {
        self.seats.iter().flatten().count()
    }

    pub fn is_full(&self) -> bool {
        self.occupied() == 2
    }

    /// Iterates occupied seats in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &PlayerSeat)> {
        self.seats.iter().enumerate().filter_map(|(index, seat)| {
            let slot = Slot::new(index as u8 + 1)?;
            Some((slot, seat.as_ref()?))
        })
    }
}

// Slots are 1 and 2 on the wire; the seat array is zero-based.
fn seat_index(slot: Slot) -> usize {
    usize::from(slot.index() - 1)
}

// ============================================================
// Tests
// ============================================================
