//! Chat state owned by the command processor.

use crate::{
    domain::{ClientId, ClientRepository, Nickname, NicknameRepository, RoomRepository},
    infrastructure::repository::{
        InMemoryClientRepository, InMemoryNicknameRepository, InMemoryRoomRepository,
    },
};

/// All mutable chat state: admitted clients, rooms and claimed nicknames.
pub struct ChatState {
    pub clients: Box<dyn ClientRepository>,
    pub rooms: Box<dyn RoomRepository>,
    pub nicknames: Box<dyn NicknameRepository>,
}

impl ChatState {
    pub fn new(
        clients: Box<dyn ClientRepository>,
        rooms: Box<dyn RoomRepository>,
        nicknames: Box<dyn NicknameRepository>,
    ) -> Self {
        Self {
            clients,
            rooms,
            nicknames,
        }
    }

    /// State backed by the in-memory repositories.
    pub fn in_memory(history_limit: Option<usize>) -> Self {
        Self::new(
            Box::new(InMemoryClientRepository::new()),
            Box::new(InMemoryRoomRepository::with_history_limit(history_limit)),
            Box::new(InMemoryNicknameRepository::new()),
        )
    }

    /// Nickname of a client that finished onboarding.
    pub fn nickname_of(&self, client_id: &ClientId) -> Option<Nickname> {
        self.clients
            .get(client_id)
            .and_then(|client| client.nickname.clone())
    }
}
