//! 送信キューを使った MessagePusher 実装
//!
//! ## 責務
//!
//! - セッションごとの送信キュー（`PusherChannel`）を管理
//! - クライアントへのメッセージ送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! キューへの投入は `try_send` のみで行い、決して待たない。キューが満杯の
//! クライアントにはその行を届けずに警告ログを出す。ソケットへの書き込みは
//! 各セッションのライタータスク（`ui::handler::session`）が担当する。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc::error::TrySendError};

use crate::domain::{ClientId, MessagePushError, MessagePusher, PusherChannel};

/// 送信キューを使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = ChannelMessagePusher::new();
/// pusher.register_client(client_id, tx).await;
/// pusher.push_to(&client_id, "[SUCCESS]").await?;
/// ```
#[derive(Default)]
pub struct ChannelMessagePusher {
    /// 接続中のクライアントの送信キュー
    clients: Mutex<HashMap<ClientId, PusherChannel>>,
}

impl ChannelMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }
}

fn enqueue(
    client_id: &ClientId,
    sender: &PusherChannel,
    content: &str,
) -> Result<(), MessagePushError> {
    sender
        .try_send(content.to_string())
        .map_err(|e| match e {
            TrySendError::Full(_) => MessagePushError::QueueFull(client_id.to_string()),
            TrySendError::Closed(_) => MessagePushError::Disconnected(client_id.to_string()),
        })
}

#[async_trait]
impl MessagePusher for ChannelMessagePusher {
    async fn register_client(&self, client_id: ClientId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(client_id, sender);
        tracing::debug!("Client '{}' registered to MessagePusher", client_id);
    }

    async fn unregister_client(&self, client_id: &ClientId) {
        let mut clients = self.clients.lock().await;
        clients.remove(client_id);
        tracing::debug!("Client '{}' unregistered from MessagePusher", client_id);
    }

    async fn push_to(&self, client_id: &ClientId, content: &str) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;

        let sender = clients
            .get(client_id)
            .ok_or_else(|| MessagePushError::ClientNotFound(client_id.to_string()))?;
        enqueue(client_id, sender, content)?;
        tracing::trace!("Pushed message to client '{}'", client_id);
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: Vec<ClientId>,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;

        for target in targets {
            let Some(sender) = clients.get(&target) else {
                tracing::warn!("Client '{}' not found during broadcast, skipping", target);
                continue;
            };
            // ブロードキャストでは一部の送信失敗を許容
            if let Err(e) = enqueue(&target, sender, content) {
                tracing::warn!("Dropped broadcast line: {}", e);
            }
        }

        Ok(())
    }
}
