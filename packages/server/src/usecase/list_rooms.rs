//! UseCase: ルーム一覧（`/rooms`）

use std::sync::Arc;

use crate::domain::{ClientId, MessageFormatter, MessagePusher};

use super::{ChatState, delivery::push_reply};

/// ルーム一覧取得のユースケース
pub struct ListRoomsUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl ListRoomsUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 名前順のルーム一覧を要求したクライアントに返す
    pub async fn execute(&self, state: &ChatState, client_id: ClientId) {
        let room_names = state.rooms.room_names();
        let reply = MessageFormatter::format_room_list(&room_names);
        push_reply(self.message_pusher.as_ref(), &client_id, &reply).await;
    }
}
