//! Test doubles shared by the use case tests.

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;

use crate::domain::{
    Client, ClientId, ClientIdFactory, MessagePushError, MessagePusher, Nickname, PusherChannel,
    Timestamp,
};

use super::ChatState;

/// MessagePusher that records every delivery instead of sending it.
#[derive(Default)]
pub struct RecordingPusher {
    pushed: Mutex<Vec<(ClientId, String)>>,
    registered: Mutex<HashSet<ClientId>>,
}

impl RecordingPusher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Everything delivered to `client_id`, in order.
    pub fn lines_for(&self, client_id: &ClientId) -> Vec<String> {
        self.pushed
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| id == client_id)
            .map(|(_, line)| line.clone())
            .collect()
    }

    pub fn is_registered(&self, client_id: &ClientId) -> bool {
        self.registered.lock().unwrap().contains(client_id)
    }

    pub fn clear(&self) {
        self.pushed.lock().unwrap().clear();
    }
}

#[async_trait]
impl MessagePusher for RecordingPusher {
    async fn register_client(&self, client_id: ClientId, _sender: PusherChannel) {
        self.registered.lock().unwrap().insert(client_id);
    }

    async fn unregister_client(&self, client_id: &ClientId) {
        self.registered.lock().unwrap().remove(client_id);
    }

    async fn push_to(&self, client_id: &ClientId, content: &str) -> Result<(), MessagePushError> {
        self.pushed
            .lock()
            .unwrap()
            .push((*client_id, content.to_string()));
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: Vec<ClientId>,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let mut pushed = self.pushed.lock().unwrap();
        for target in targets {
            pushed.push((target, content.to_string()));
        }
        Ok(())
    }
}

/// Register an onboarded client directly in the state.
pub fn add_onboarded_client(state: &mut ChatState, name: &str) -> ClientId {
    let client_id = ClientIdFactory::generate();
    let nickname = Nickname::new(name.to_string()).unwrap();
    let mut client = Client::new(client_id, Timestamp::new(0));
    client.nickname = Some(nickname.clone());
    state.clients.insert(client);
    state.nicknames.claim(nickname).unwrap();
    client_id
}
