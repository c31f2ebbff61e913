//! UseCase: オンボーディング時のニックネーム確保
//!
//! 空チェックと重複チェックは試行のたびにここで行う。確保とクライアントへの
//! 割り当ては同じ呼び出しの中で行うので、途中の状態が外から見えることはない。

use crate::domain::{ClientId, Nickname};

use super::{ChatState, error::NicknameError};

/// ニックネーム確保のユースケース
#[derive(Debug, Default)]
pub struct ClaimNicknameUseCase;

impl ClaimNicknameUseCase {
    pub fn new() -> Self {
        Self
    }

    /// ニックネームを検証して確保し、クライアントに割り当てる
    ///
    /// # Arguments
    ///
    /// * `candidate` - クライアントが入力した行（前後の空白は無視）
    pub fn execute(
        &self,
        state: &mut ChatState,
        client_id: ClientId,
        candidate: String,
    ) -> Result<Nickname, NicknameError> {
        let nickname = Nickname::new(candidate).map_err(|_| NicknameError::Empty)?;

        let client = state
            .clients
            .get_mut(&client_id)
            .ok_or_else(|| NicknameError::UnknownClient(client_id.to_string()))?;

        if state.nicknames.is_claimed(&nickname) {
            return Err(NicknameError::Taken(nickname.into_string()));
        }
        state
            .nicknames
            .claim(nickname.clone())
            .map_err(|_| NicknameError::Taken(nickname.as_str().to_string()))?;

        if let Some(previous) = client.nickname.replace(nickname.clone()) {
            state.nicknames.release(&previous);
        }

        Ok(nickname)
    }
}
