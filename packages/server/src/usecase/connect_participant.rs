//! UseCase: 参加者接続処理（受け入れ判定）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - 接続数の上限チェックとクライアント登録
//!
//! ### どのような状況を想定しているか
//! - 正常系：上限未満での接続
//! - 異常系：上限に達した状態での接続（状態は一切作られない）

use std::sync::Arc;

use crate::domain::{Client, ClientId, MessagePusher, PusherChannel, Timestamp};

use super::{ChatState, error::AdmissionError};

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// 同時接続数の上限（オンボーディング中のクライアントも数える）
    max_clients: usize,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>, max_clients: usize) -> Self {
        Self {
            message_pusher,
            max_clients,
        }
    }

    /// 参加者接続を実行
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 受け入れ成功（クライアントと送信キューを登録済み）
    /// * `Err(AdmissionError)` - 上限に達している
    pub async fn execute(
        &self,
        state: &mut ChatState,
        client_id: ClientId,
        sender: PusherChannel,
        connected_at: Timestamp,
    ) -> Result<(), AdmissionError> {
        if state.clients.count() >= self.max_clients {
            return Err(AdmissionError::ServerFull {
                max_clients: self.max_clients,
            });
        }

        state.clients.insert(Client::new(client_id, connected_at));
        self.message_pusher.register_client(client_id, sender).await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ClientIdFactory, MockMessagePusher},
        usecase::test_support::RecordingPusher,
    };
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_connect_participant_success() {
        // テスト項目: 上限未満なら受け入れられ、送信キューが登録される
        // given (前提条件):
        let mut state = ChatState::in_memory(None);
        let pusher = RecordingPusher::new();
        let usecase = ConnectParticipantUseCase::new(pusher.clone(), 2);
        let client_id = ClientIdFactory::generate();
        let (tx, _rx) = mpsc::channel(1);

        // when (操作):
        let result = usecase
            .execute(&mut state, client_id, tx, Timestamp::new(1000))
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(state.clients.count(), 1);
        assert!(pusher.is_registered(&client_id));
        let client = state.clients.get(&client_id).unwrap();
        assert!(!client.is_onboarded());
        assert_eq!(client.current_room, None);
    }

    #[tokio::test]
    async fn test_connect_participant_capacity_exceeded() {
        // テスト項目: 上限に達していると拒否され、何も登録されない
        // given (前提条件):
        let mut state = ChatState::in_memory(None);
        let mut mock = MockMessagePusher::new();
        mock.expect_register_client().times(2).return_const(());
        let usecase = ConnectParticipantUseCase::new(Arc::new(mock), 2);
        for _ in 0..2 {
            let (tx, _rx) = mpsc::channel(1);
            usecase
                .execute(&mut state, ClientIdFactory::generate(), tx, Timestamp::new(0))
                .await
                .unwrap();
        }

        // when (操作): 3人目の接続を試みる
        let charlie = ClientIdFactory::generate();
        let (tx, _rx) = mpsc::channel(1);
        let result = usecase
            .execute(&mut state, charlie, tx, Timestamp::new(0))
            .await;

        // then (期待する結果): 容量超過エラーが返され、2人のまま
        assert_eq!(result, Err(AdmissionError::ServerFull { max_clients: 2 }));
        assert_eq!(state.clients.count(), 2);
        assert!(state.clients.get(&charlie).is_none());
    }
}
