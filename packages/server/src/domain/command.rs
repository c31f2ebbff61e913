//! Commands submitted by sessions to the command processor.

use super::value_object::{ClientId, Timestamp};

/// What a client asked for.
///
/// Arguments are kept raw; the command processor validates them so that a
/// single component decides what a valid request looks like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandKind {
    /// `/join <room>`
    Join(Option<String>),
    /// `/rooms`
    ListRooms,
    /// Any line that is not a known command
    SendMessage(String),
    /// `/name <new name>`
    Rename(Option<String>),
    /// `/quit`
    Quit,
    /// The connection broke or went idle
    Disconnected,
}

/// A command together with its origin and translation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub client_id: ClientId,
    pub issued_at: Timestamp,
    pub kind: CommandKind,
}

impl Command {
    pub fn new(client_id: ClientId, issued_at: Timestamp, kind: CommandKind) -> Self {
        Self {
            client_id,
            issued_at,
            kind,
        }
    }

    /// Whether this command ends the client's session.
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, CommandKind::Quit | CommandKind::Disconnected)
    }
}
