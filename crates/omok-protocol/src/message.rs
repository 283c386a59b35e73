//! The message vocabulary: one closed enum per direction.
//!
//! Inbound text is parsed once ([`ClientMessage::from_str`]) into a
//! variant; outbound messages render their exact wire string through
//! `Display`. Anything the parser doesn't recognize becomes
//! [`ProtocolError::UnknownCommand`], which callers treat as
//! "log and ignore", never as a reason to drop the connection.

use std::fmt;
use std::str::FromStr;

use crate::{AuthMode, PlayerStats, ProtocolError, Slot};

// ---------------------------------------------------------------------------
// ClientMessage
// ---------------------------------------------------------------------------

/// A message sent by a client to the server.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientMessage {
    /// `AUTH <mode> <user> <pass>` — authenticate or create an account.
    Auth {
        /// LOGIN or REGISTER.
        mode: AuthMode,
        /// Account name, also the display name.
        user: String,
        /// Credential, passed through to the account store verbatim.
        pass: String,
    },
    /// `MOVE <x> <y>` — request to place a stone.
    Move {
        /// Column, `0..15` once validated by the match state.
        x: u8,
        /// Row, `0..15` once validated by the match state.
        y: u8,
    },
    /// `RESET` — request a rematch (or accept a pending one).
    Reset,
    /// `CHAT <text>` — relay a chat line to both players.
    Chat {
        /// The raw chat text, everything after the command word.
        text: String,
    },
}

impl FromStr for ClientMessage {
    type Err = ProtocolError;

    fn from_str(line: &str) -> Result<ClientMessage, ProtocolError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (command, rest) = match line.split_once(' ') {
            Some((c, r)) => (c, r),
            None if line.is_empty() => return Err(ProtocolError::Empty),
            None => (line, ""),
        };

        match command {
            "AUTH" => {
                let mut parts = rest.splitn(3, ' ');
                let mode = parts.next().filter(|s| !s.is_empty()).ok_or(
                    ProtocolError::MissingField {
                        command: "AUTH",
                        field: "mode",
                    },
                )?;
                let user = parts.next().ok_or(ProtocolError::MissingField {
                    command: "AUTH",
                    field: "user",
                })?;
                let pass = parts.next().ok_or(ProtocolError::MissingField {
                    command: "AUTH",
                    field: "pass",
                })?;
                Ok(ClientMessage::Auth {
                    mode: AuthMode::parse(mode)?,
                    user: user.to_string(),
                    pass: pass.to_string(),
                })
            }
            "MOVE" => {
                let mut parts = rest.split(' ');
                let x = parse_u8("MOVE", "x", parts.next())?;
                let y = parse_u8("MOVE", "y", parts.next())?;
                Ok(ClientMessage::Move { x, y })
            }
            "RESET" => Ok(ClientMessage::Reset),
            "CHAT" => {
                if rest.is_empty() {
                    return Err(ProtocolError::MissingField {
                        command: "CHAT",
                        field: "text",
                    });
                }
                Ok(ClientMessage::Chat {
                    text: rest.to_string(),
                })
            }
            other => Err(ProtocolError::UnknownCommand(other.to_string())),
        }
    }
}

fn parse_u8(
    command: &'static str,
    field: &'static str,
    token: Option<&str>,
) -> Result<u8, ProtocolError> {
    let token = token
        .filter(|s| !s.is_empty())
        .ok_or(ProtocolError::MissingField { command, field })?;
    token.parse().map_err(|_| ProtocolError::InvalidNumber {
        command,
        value: token.to_string(),
    })
}

// ---------------------------------------------------------------------------
// ServerMessage
// ---------------------------------------------------------------------------

/// A message sent by the server to one or more clients.
///
/// `Display` renders the exact wire string; the coordinator broadcasts
/// these values and the transport writes `to_string()` as one text frame.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerMessage {
    /// `AUTH_OK <slot> <user>` — authentication succeeded, seat assigned.
    AuthOk { slot: Slot, user: String },
    /// `AUTH_FAIL <reason>` — authentication rejected, connection stays up.
    AuthFail { reason: String },
    /// `MOVE <x> <y> <slot>` — confirmed placement, broadcast to both.
    Move { x: u8, y: u8, slot: Slot },
    /// `WIN <name>` — match ended, winner's display name.
    Win { name: String },
    /// `DRAW` — match ended with a full board and no winner.
    Draw,
    /// `RESET` — board cleared, a new match is about to start.
    Reset,
    /// `START <slot>` — new match begins, starting turn holder.
    Start { slot: Slot },
    /// `TIME <seconds>` — countdown update.
    Time { seconds: u32 },
    /// `TURN <slot>` — turn changed.
    Turn { slot: Slot },
    /// `CHAT <slot> <name> : <text>` — chat relay.
    Chat { slot: Slot, name: String, text: String },
    /// `REMATCH_PROMPT <name>` — the named opponent requested a rematch.
    RematchPrompt { name: String },
    /// `REMATCH_WAIT <name>` — waiting for the named opponent's answer.
    RematchWait { name: String },
    /// `REMATCH_ACCEPT <name>` — the named player accepted; new match starts.
    RematchAccept { name: String },
    /// `REMATCH_CANCEL` — the pending request was cancelled.
    RematchCancel,
    /// `REMATCH_FAIL <reason>` — the request cannot proceed.
    RematchFail { reason: String },
    /// `REMATCH_ALREADY <detail>` — a request from this seat is already pending.
    RematchAlready { detail: String },
    /// `WAITING` — fewer than two players connected.
    Waiting,
    /// `PLAYER_INFO ...` — live win/loss tallies for both seats.
    PlayerInfo { black: PlayerStats, white: PlayerStats },
    /// `SERVER_FULL` — no free seat; the connection will be closed.
    ServerFull,
}

impl fmt::Display for ServerMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerMessage::AuthOk { slot, user } => {
                write!(f, "AUTH_OK {slot} {user}")
            }
            ServerMessage::AuthFail { reason } => write!(f, "AUTH_FAIL {reason}"),
            ServerMessage::Move { x, y, slot } => write!(f, "MOVE {x} {y} {slot}"),
            ServerMessage::Win { name } => write!(f, "WIN {name}"),
            ServerMessage::Draw => write!(f, "DRAW"),
            ServerMessage::Reset => write!(f, "RESET"),
            ServerMessage::Start { slot } => write!(f, "START {slot}"),
            ServerMessage::Time { seconds } => write!(f, "TIME {seconds}"),
            ServerMessage::Turn { slot } => write!(f, "TURN {slot}"),
            ServerMessage::Chat { slot, name, text } => {
                write!(f, "CHAT {slot} {name} : {text}")
            }
            ServerMessage::RematchPrompt { name } => {
                write!(f, "REMATCH_PROMPT {name}")
            }
            ServerMessage::RematchWait { name } => write!(f, "REMATCH_WAIT {name}"),
            ServerMessage::RematchAccept { name } => {
                write!(f, "REMATCH_ACCEPT {name}")
            }
            ServerMessage::RematchCancel => write!(f, "REMATCH_CANCEL"),
            ServerMessage::RematchFail { reason } => {
                write!(f, "REMATCH_FAIL {reason}")
            }
            ServerMessage::RematchAlready { detail } => {
                write!(f, "REMATCH_ALREADY {detail}")
            }
            ServerMessage::Waiting => write!(f, "WAITING"),
            ServerMessage::PlayerInfo { black, white } => {
                write!(
                    f,
                    "PLAYER_INFO {} {} {} {:.2} {} {} {} {:.2}",
                    black.name,
                    black.wins,
                    black.losses,
                    black.rate,
                    white.name,
                    white.wins,
                    white.losses,
                    white.rate
                )
            }
            ServerMessage::ServerFull => write!(f, "SERVER_FULL"),
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
