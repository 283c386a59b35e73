//! Error types for the protocol layer.

/// Errors that can occur while parsing an inbound text message.
///
/// A `ProtocolError` always means the *message* was bad, never the
/// connection — callers log it and ignore the message rather than
/// terminating anything.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The command word is not part of the recognized vocabulary.
    ///
    /// This is the explicit default case for unknown messages: the
    /// parser surfaces it, the handler logs and drops it.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// The command was recognized but an argument is missing.
    #[error("{command}: missing {field}")]
    MissingField {
        /// The command word being parsed.
        command: &'static str,
        /// Which argument was absent.
        field: &'static str,
    },

    /// An argument failed numeric parsing.
    #[error("{command}: invalid number {value:?}")]
    InvalidNumber {
        /// The command word being parsed.
        command: &'static str,
        /// The offending token.
        value: String,
    },

    /// An argument parsed but is outside its allowed range
    /// (e.g., a slot other than 1 or 2, or an auth mode that is
    /// neither LOGIN nor REGISTER).
    #[error("{command}: invalid value {value:?}")]
    InvalidValue {
        /// The command word being parsed.
        command: &'static str,
        /// The offending token.
        value: String,
    },

    /// The message was empty (a blank line).
    #[error("empty message")]
    Empty,
}
