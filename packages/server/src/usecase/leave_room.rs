//! UseCase: 現在のルームからの退室
//!
//! `/join` で別のルームへ移るとき、`/quit` と切断のときに共通で使う。

use std::sync::Arc;

use crate::domain::{ClientId, MessageFormatter, MessagePusher, RoomName};

use super::{ChatState, delivery::broadcast_line};

/// 退室のユースケース
pub struct LeaveRoomUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl LeaveRoomUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// クライアントを現在のルームから外し、残りのメンバーに退室を通知する
    ///
    /// # Returns
    ///
    /// 退室したルーム名（どのルームにもいなければ `None`）
    pub async fn execute(&self, state: &mut ChatState, client_id: ClientId) -> Option<RoomName> {
        let client = state.clients.get_mut(&client_id)?;
        let room_name = client.current_room.take()?;
        let nickname = client.nickname.clone();

        let room = state.rooms.get_mut(&room_name)?;
        room.remove_member(&client_id);

        if let Some(nickname) = nickname {
            let notice = MessageFormatter::format_left_notice(&nickname);
            room.append_history(notice.clone());
            let targets = room.members_except(&client_id);
            tracing::info!("'{}' left room '{}'", nickname, room_name);
            broadcast_line(self.message_pusher.as_ref(), targets, &notice).await;
        }

        Some(room_name)
    }
}
