//! UseCase: ルームへの参加（`/join`）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ルームの作成と参加、前のルームからの退室
//! - 他のメンバーへの入室通知（本人には送らない）
//! - 参加前の履歴が本人にだけ順番どおり再生されること
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規ルーム・既存ルームへの参加、ルームの移動
//! - 異常系：ルーム名なし

use std::sync::Arc;

use crate::domain::{
    ClientId, MessageFormatter, MessagePusher, RoomName, Timestamp, reply::JOIN_USAGE,
};

use super::{
    ChatState, LeaveRoomUseCase,
    delivery::{broadcast_line, push_reply},
};

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    message_pusher: Arc<dyn MessagePusher>,
    leave_room: LeaveRoomUseCase,
}

impl JoinRoomUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            leave_room: LeaveRoomUseCase::new(message_pusher.clone()),
            message_pusher,
        }
    }

    /// ルーム参加を実行
    ///
    /// # Arguments
    ///
    /// * `room_name` - `/join` の引数（未指定なら使い方を返す）
    /// * `issued_at` - ルームを新規作成する場合の作成時刻
    pub async fn execute(
        &self,
        state: &mut ChatState,
        client_id: ClientId,
        room_name: Option<String>,
        issued_at: Timestamp,
    ) {
        let pusher = self.message_pusher.as_ref();

        let Some(room_name) = room_name.and_then(|name| RoomName::new(name).ok()) else {
            push_reply(pusher, &client_id, JOIN_USAGE).await;
            return;
        };
        let Some(nickname) = state.nickname_of(&client_id) else {
            return;
        };

        // 1. 前のルームから退室（1クライアント1ルーム）
        self.leave_room.execute(state, client_id).await;

        // 2. ルームを取得（なければ作成）して参加
        let room = state.rooms.get_or_create(&room_name, issued_at);
        let backlog: Vec<String> = room.history().map(str::to_string).collect();
        room.add_member(client_id);

        // 3. 入室通知を履歴に追加
        let notice = MessageFormatter::format_joined_notice(&nickname);
        room.append_history(notice.clone());
        let targets = room.members_except(&client_id);

        if let Some(client) = state.clients.get_mut(&client_id) {
            client.current_room = Some(room_name.clone());
        }
        tracing::info!("'{}' joined room '{}'", nickname, room_name);

        // 4. 他のメンバーへ通知し、参加前の履歴を本人にだけ再生
        broadcast_line(pusher, targets, &notice).await;
        if !backlog.is_empty() {
            push_reply(pusher, &client_id, &backlog.join("\n")).await;
        }
    }
}
