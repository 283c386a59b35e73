//! Identity and payload types that appear inside wire messages.

use std::fmt;

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Slot
// ---------------------------------------------------------------------------

/// One of the two player seats in a match.
///
/// A slot is a stable integer identity (1 or 2) that a connected client
/// occupies for the duration of a match series. Slot 1 is always the
/// first mover (black) and the only side subject to the double-three
/// restriction; slot 2 is white.
///
/// This is a newtype over `u8` so a slot can't be confused with a
/// coordinate or a count in a signature, and so `Display` renders the
/// exact wire token (`1` / `2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot(u8);

impl Slot {
    /// Slot 1 — black, the first mover.
    pub const ONE: Slot = Slot(1);
    /// Slot 2 — white.
    pub const TWO: Slot = Slot(2);

    /// Builds a slot from its wire integer. Only 1 and 2 are valid.
    pub fn new(n: u8) -> Option<Slot> {
        match n {
            1 => Some(Slot::ONE),
            2 => Some(Slot::TWO),
            _ => None,
        }
    }

    /// The opposing seat.
    pub fn other(self) -> Slot {
        if self == Slot::ONE { Slot::TWO } else { Slot::ONE }
    }

    /// The wire integer (1 or 2).
    pub fn index(self) -> u8 {
        self.0
    }

    /// `true` for slot 1, the side the forbidden-move rule applies to.
    pub fn is_first_mover(self) -> bool {
        self == Slot::ONE
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// AuthMode
// ---------------------------------------------------------------------------

/// The two forms of the `AUTH` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Authenticate an existing account.
    Login,
    /// Create a new account (and log in on success).
    Register,
}

impl AuthMode {
    pub(crate) fn parse(token: &str) -> Result<AuthMode, ProtocolError> {
        match token {
            "LOGIN" => Ok(AuthMode::Login),
            "REGISTER" => Ok(AuthMode::Register),
            other => Err(ProtocolError::InvalidValue {
                command: "AUTH",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMode::Login => write!(f, "LOGIN"),
            AuthMode::Register => write!(f, "REGISTER"),
        }
    }
}

// ---------------------------------------------------------------------------
// PlayerStats
// ---------------------------------------------------------------------------

/// One player's half of a `PLAYER_INFO` broadcast.
///
/// `rate` is a win percentage in `[0, 100]`, rendered with exactly two
/// decimals on the wire (`75.00`). Zero when no games are recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerStats {
    /// Display name.
    pub name: String,
    /// Recorded wins.
    pub wins: u32,
    /// Recorded losses.
    pub losses: u32,
    /// Win percentage, two decimals on the wire.
    pub rate: f64,
}

impl PlayerStats {
    /// Computes the win rate from tallies: `wins / (wins + losses) × 100`,
    /// or 0 when no games are recorded.
    pub fn from_tallies(name: impl Into<String>, wins: u32, losses: u32) -> PlayerStats {
        let total = wins + losses;
        let rate = if total == 0 {
            0.0
        } else {
            f64::from(wins) / f64::from(total) * 100.0
        };
        PlayerStats {
            name: name.into(),
            wins,
            losses,
            rate,
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
