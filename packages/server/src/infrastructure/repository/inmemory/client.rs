//! InMemory Client Repository 実装

use std::collections::HashMap;

use crate::domain::{Client, ClientId, ClientRepository};

/// 接続中のクライアントを保持するインメモリ実装
#[derive(Debug, Default)]
pub struct InMemoryClientRepository {
    clients: HashMap<ClientId, Client>,
}

impl InMemoryClientRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClientRepository for InMemoryClientRepository {
    fn insert(&mut self, client: Client) {
        self.clients.insert(client.id, client);
    }

    fn get(&self, client_id: &ClientId) -> Option<&Client> {
        self.clients.get(client_id)
    }

    fn get_mut(&mut self, client_id: &ClientId) -> Option<&mut Client> {
        self.clients.get_mut(client_id)
    }

    fn remove(&mut self, client_id: &ClientId) -> Option<Client> {
        self.clients.remove(client_id)
    }

    fn count(&self) -> usize {
        self.clients.len()
    }
}
