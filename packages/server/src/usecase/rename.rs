//! UseCase: ニックネーム変更（`/name`）

use std::sync::Arc;

use crate::domain::{
    ClientId, MessagePusher,
    reply::{RENAME_SUCCESS, RENAME_TAKEN, RENAME_USAGE},
};

use super::{ChatState, ClaimNicknameUseCase, delivery::push_reply, error::NicknameError};

/// ニックネーム変更のユースケース
pub struct RenameUseCase {
    message_pusher: Arc<dyn MessagePusher>,
    claim_nickname: ClaimNicknameUseCase,
}

impl RenameUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            message_pusher,
            claim_nickname: ClaimNicknameUseCase::new(),
        }
    }

    /// ニックネーム変更を実行
    ///
    /// 成功すると古い名前は解放される。自分の現在の名前への変更も成功扱い。
    pub async fn execute(&self, state: &mut ChatState, client_id: ClientId, new_name: Option<String>) {
        let pusher = self.message_pusher.as_ref();

        let Some(new_name) = new_name else {
            push_reply(pusher, &client_id, RENAME_USAGE).await;
            return;
        };
        let current = state.nickname_of(&client_id);
        if current.as_ref().is_some_and(|nick| nick.as_str() == new_name.trim()) {
            push_reply(pusher, &client_id, RENAME_SUCCESS).await;
            return;
        }

        match self.claim_nickname.execute(state, client_id, new_name) {
            Ok(nickname) => {
                tracing::info!(
                    "Client '{}' renamed from '{}' to '{}'",
                    client_id,
                    current.map(|nick| nick.into_string()).unwrap_or_default(),
                    nickname
                );
                push_reply(pusher, &client_id, RENAME_SUCCESS).await;
            }
            Err(NicknameError::Empty) => push_reply(pusher, &client_id, RENAME_USAGE).await,
            Err(NicknameError::Taken(_)) => push_reply(pusher, &client_id, RENAME_TAKEN).await,
            Err(e @ NicknameError::UnknownClient(_)) => {
                tracing::warn!("Rename ignored: {}", e);
            }
        }
    }
}
