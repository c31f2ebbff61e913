//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 退室通知、ニックネームの解放、クライアントの削除、送信キューの破棄
//!
//! ### なぜこのテストが必要か
//! - `/quit` と切断で同じ後始末が行われることを保証
//! - 二重の切断通知が無害であることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：ルーム参加中の `/quit`（別れの挨拶あり）
//! - エッジケース：オンボーディング中の切断（通知対象なし）
//! - 異常系：存在しない参加者の切断

use std::sync::Arc;

use crate::domain::{Client, ClientId, MessagePusher, reply::FAREWELL};

use super::{ChatState, LeaveRoomUseCase, delivery::push_reply};

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    leave_room: LeaveRoomUseCase,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            leave_room: LeaveRoomUseCase::new(message_pusher.clone()),
            message_pusher,
        }
    }

    /// 参加者切断を実行
    ///
    /// # Arguments
    ///
    /// * `farewell` - `/quit` の場合は true（別れの挨拶を送ってからキューを破棄）
    ///
    /// # Returns
    ///
    /// 削除したクライアント（既に削除済みなら `None`）
    pub async fn execute(
        &self,
        state: &mut ChatState,
        client_id: ClientId,
        farewell: bool,
    ) -> Option<Client> {
        if state.clients.get(&client_id).is_none() {
            tracing::debug!("Client '{}' already removed", client_id);
            return None;
        }

        // 1. ルームから退室（残りのメンバーに通知）
        self.leave_room.execute(state, client_id).await;

        // 2. クライアントを削除し、ニックネームを解放
        let client = state.clients.remove(&client_id)?;
        if let Some(nickname) = &client.nickname {
            state.nicknames.release(nickname);
        }

        // 3. 別れの挨拶を送ってから送信キューを破棄（書き込みタスクが残りを流して閉じる）
        if farewell {
            push_reply(self.message_pusher.as_ref(), &client_id, FAREWELL).await;
        }
        self.message_pusher.unregister_client(&client_id).await;

        match &client.nickname {
            Some(nickname) => tracing::info!("'{}' ({}) left the server", nickname, client_id),
            None => tracing::info!("Client '{}' left during onboarding", client_id),
        }

        Some(client)
    }
}
