//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 送信者以外のメンバーへのブロードキャストと履歴への追加
//!
//! ### なぜこのテストが必要か
//! - 送信者本人にはエコーしないが、履歴には残ることを保証
//! - ルーム未参加・空メッセージの案内を保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：メッセージ送信とブロードキャスト
//! - 異常系：ルームが存在しない、ルーム未参加、空メッセージ
//! - エッジケース：送信者のみがルームにいる場合（ブロードキャスト対象なし）

use std::sync::Arc;

use crate::domain::{
    ClientId, MessageFormatter, MessagePusher, Timestamp,
    reply::{EMPTY_MESSAGE, FIRST_JOIN},
};

use super::{
    ChatState,
    delivery::{broadcast_line, push_reply},
};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `from_client_id` - メッセージ送信者のクライアント ID
    /// * `text` - 受信した行そのもの
    /// * `sent_at` - 行を受信した時刻（表示用のタイムスタンプ）
    pub async fn execute(
        &self,
        state: &mut ChatState,
        from_client_id: ClientId,
        text: &str,
        sent_at: Timestamp,
    ) {
        let pusher = self.message_pusher.as_ref();

        // 1. 参加中のルームを確認
        let Some(client) = state.clients.get(&from_client_id) else {
            return;
        };
        let (Some(nickname), Some(room_name)) =
            (client.nickname.clone(), client.current_room.clone())
        else {
            push_reply(pusher, &from_client_id, FIRST_JOIN).await;
            return;
        };
        let Some(room) = state.rooms.get_mut(&room_name) else {
            push_reply(pusher, &from_client_id, FIRST_JOIN).await;
            return;
        };

        if text.trim().is_empty() {
            push_reply(pusher, &from_client_id, EMPTY_MESSAGE).await;
            return;
        }

        // 2. 履歴に追加し、送信者以外へブロードキャスト
        let line = MessageFormatter::format_chat_line(sent_at, &nickname, text);
        room.append_history(line.clone());
        let targets = room.members_except(&from_client_id);
        tracing::debug!(
            "'{}' sent a message to room '{}' ({} recipients)",
            nickname,
            room_name,
            targets.len()
        );

        broadcast_line(pusher, targets, &line).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MockMessagePusher, RoomName},
        usecase::{
            JoinRoomUseCase,
            test_support::{RecordingPusher, add_onboarded_client},
        },
    };

    async fn join(state: &mut ChatState, pusher: Arc<RecordingPusher>, id: ClientId, name: &str) {
        JoinRoomUseCase::new(pusher)
            .execute(state, id, Some(name.to_string()), Timestamp::new(0))
            .await;
    }

    #[tokio::test]
    async fn test_send_message_broadcasts_to_others_and_records_history() {
        // テスト項目: メッセージは送信者以外に届き、履歴にも追加される
        // given (前提条件):
        let mut state = ChatState::in_memory(None);
        let pusher = RecordingPusher::new();
        let alice = add_onboarded_client(&mut state, "alice");
        let bob = add_onboarded_client(&mut state, "bob");
        join(&mut state, pusher.clone(), alice, "lobby").await;
        join(&mut state, pusher.clone(), bob, "lobby").await;
        pusher.clear();

        // when (操作):
        SendMessageUseCase::new(pusher.clone())
            .execute(&mut state, alice, "hello", Timestamp::new(0))
            .await;

        // then (期待する結果):
        let bob_lines = pusher.lines_for(&bob);
        assert_eq!(bob_lines.len(), 1);
        assert!(bob_lines[0].ends_with("][alice]: hello"));
        assert!(pusher.lines_for(&alice).is_empty());
        let lobby = state
            .rooms
            .get(&RoomName::new("lobby".to_string()).unwrap())
            .unwrap();
        assert_eq!(lobby.history().last(), Some(bob_lines[0].as_str()));
    }

    #[tokio::test]
    async fn test_send_message_alone_in_room() {
        // テスト項目: ルームに送信者しかいない場合は誰にも届かないが履歴には残る
        // given (前提条件):
        let mut state = ChatState::in_memory(None);
        let pusher = RecordingPusher::new();
        let alice = add_onboarded_client(&mut state, "alice");
        join(&mut state, pusher.clone(), alice, "lobby").await;

        // when (操作):
        SendMessageUseCase::new(pusher.clone())
            .execute(&mut state, alice, "anyone?", Timestamp::new(0))
            .await;

        // then (期待する結果):
        assert!(pusher.lines_for(&alice).is_empty());
        let lobby = state
            .rooms
            .get(&RoomName::new("lobby".to_string()).unwrap())
            .unwrap();
        assert_eq!(lobby.history_len(), 2);
    }

    #[tokio::test]
    async fn test_send_message_outside_room_replies_hint() {
        // テスト項目: ルーム未参加の場合は案内だけを返す
        // given (前提条件):
        let mut state = ChatState::in_memory(None);
        let alice = add_onboarded_client(&mut state, "alice");
        let mut mock = MockMessagePusher::new();
        mock.expect_push_to()
            .withf(|_, content| content == FIRST_JOIN)
            .times(1)
            .returning(|_, _| Ok(()));
        mock.expect_broadcast().never();

        // when (操作):
        SendMessageUseCase::new(Arc::new(mock))
            .execute(&mut state, alice, "hello", Timestamp::new(0))
            .await;

        // then (期待する結果):
        assert_eq!(state.rooms.count(), 0);
    }

    #[tokio::test]
    async fn test_send_blank_message_replies_hint() {
        // テスト項目: 空白だけのメッセージは送信されない
        // given (前提条件):
        let mut state = ChatState::in_memory(None);
        let pusher = RecordingPusher::new();
        let alice = add_onboarded_client(&mut state, "alice");
        let bob = add_onboarded_client(&mut state, "bob");
        join(&mut state, pusher.clone(), alice, "lobby").await;
        join(&mut state, pusher.clone(), bob, "lobby").await;
        pusher.clear();

        // when (操作):
        SendMessageUseCase::new(pusher.clone())
            .execute(&mut state, alice, "   ", Timestamp::new(0))
            .await;

        // then (期待する結果):
        assert_eq!(pusher.lines_for(&alice), vec![EMPTY_MESSAGE]);
        assert!(pusher.lines_for(&bob).is_empty());
    }
}
