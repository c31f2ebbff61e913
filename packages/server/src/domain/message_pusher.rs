//! MessagePusher trait 定義
//!
//! コマンドプロセッサがクライアントへ行を届けるためのインターフェース。
//! 実装はソケットに直接書き込まず、各セッションの送信キューに積むだけにする
//! （遅いクライアントがプロセッサを止めないように）。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{error::MessagePushError, value_object::ClientId};

/// Outbound queue of one session. Each item is written followed by `\n`.
pub type PusherChannel = mpsc::Sender<String>;

/// MessagePusher trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// クライアントの送信キューを登録
    async fn register_client(&self, client_id: ClientId, sender: PusherChannel);

    /// クライアントの送信キューを登録解除（ライターはキューを吐き出して終了する）
    async fn unregister_client(&self, client_id: &ClientId);

    /// 特定のクライアントに送信
    async fn push_to(&self, client_id: &ClientId, content: &str) -> Result<(), MessagePushError>;

    /// 複数のクライアントに送信（一部の失敗は許容）
    async fn broadcast(
        &self,
        targets: Vec<ClientId>,
        content: &str,
    ) -> Result<(), MessagePushError>;
}
