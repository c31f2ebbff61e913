//! InMemory Nickname Repository 実装

use std::collections::HashSet;

use crate::domain::{Nickname, NicknameRepository, RepositoryError};

/// 使用中のニックネームを保持するインメモリ実装
#[derive(Debug, Default)]
pub struct InMemoryNicknameRepository {
    claimed: HashSet<Nickname>,
}

impl InMemoryNicknameRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NicknameRepository for InMemoryNicknameRepository {
    fn is_claimed(&self, nickname: &Nickname) -> bool {
        self.claimed.contains(nickname)
    }

    fn claim(&mut self, nickname: Nickname) -> Result<(), RepositoryError> {
        if self.claimed.contains(&nickname) {
            return Err(RepositoryError::NicknameAlreadyClaimed(nickname.into_string()));
        }
        self.claimed.insert(nickname);
        Ok(())
    }

    fn release(&mut self, nickname: &Nickname) -> bool {
        self.claimed.remove(nickname)
    }

    fn count(&self) -> usize {
        self.claimed.len()
    }
}
