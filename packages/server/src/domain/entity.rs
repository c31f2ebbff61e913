//! Entities owned by the command processor.

use std::collections::{HashSet, VecDeque};

use super::value_object::{ClientId, Nickname, RoomName, Timestamp};

/// One admitted connection.
///
/// `nickname` stays `None` while the client is onboarding; `current_room` is
/// `None` while the client is not in any room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub id: ClientId,
    pub nickname: Option<Nickname>,
    pub current_room: Option<RoomName>,
    pub connected_at: Timestamp,
}

impl Client {
    pub fn new(id: ClientId, connected_at: Timestamp) -> Self {
        Self {
            id,
            nickname: None,
            current_room: None,
            connected_at,
        }
    }

    /// Whether onboarding has completed.
    pub fn is_onboarded(&self) -> bool {
        self.nickname.is_some()
    }
}

/// A named broadcast domain with members and a line history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub name: RoomName,
    pub created_at: Timestamp,
    members: HashSet<ClientId>,
    history: VecDeque<String>,
    history_limit: Option<usize>,
}

impl Room {
    /// Create a room with an unbounded history.
    pub fn new(name: RoomName, created_at: Timestamp) -> Self {
        Self::with_history_limit(name, created_at, None)
    }

    /// Create a room that keeps at most `history_limit` lines (oldest dropped first).
    pub fn with_history_limit(
        name: RoomName,
        created_at: Timestamp,
        history_limit: Option<usize>,
    ) -> Self {
        Self {
            name,
            created_at,
            members: HashSet::new(),
            history: VecDeque::new(),
            history_limit,
        }
    }

    /// Returns `false` if the client was already a member.
    pub fn add_member(&mut self, client_id: ClientId) -> bool {
        self.members.insert(client_id)
    }

    /// Returns `false` if the client was not a member.
    pub fn remove_member(&mut self, client_id: &ClientId) -> bool {
        self.members.remove(client_id)
    }

    pub fn is_member(&self, client_id: &ClientId) -> bool {
        self.members.contains(client_id)
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Every member except `exclude`.
    pub fn members_except(&self, exclude: &ClientId) -> Vec<ClientId> {
        self.members
            .iter()
            .filter(|id| *id != exclude)
            .copied()
            .collect()
    }

    pub fn append_history(&mut self, line: String) {
        self.history.push_back(line);
        if let Some(limit) = self.history_limit {
            while self.history.len() > limit {
                self.history.pop_front();
            }
        }
    }

    /// History lines, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}
