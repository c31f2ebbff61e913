//! InMemory Room Repository 実装
//!
//! ルームは最初の `/join` で作られ、空になっても削除しない。

use std::collections::HashMap;

use crate::domain::{Room, RoomName, RoomRepository, Timestamp};

/// インメモリ Room Repository 実装
#[derive(Debug, Default)]
pub struct InMemoryRoomRepository {
    rooms: HashMap<RoomName, Room>,
    /// 新しく作るルームの履歴上限（`None` なら無制限）
    history_limit: Option<usize>,
}

impl InMemoryRoomRepository {
    /// 履歴無制限の InMemoryRoomRepository を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// ルームごとの履歴上限を指定して作成
    pub fn with_history_limit(history_limit: Option<usize>) -> Self {
        Self {
            rooms: HashMap::new(),
            history_limit,
        }
    }
}

impl RoomRepository for InMemoryRoomRepository {
    fn get_or_create(&mut self, name: &RoomName, created_at: Timestamp) -> &mut Room {
        let history_limit = self.history_limit;
        self.rooms.entry(name.clone()).or_insert_with(|| {
            tracing::info!("Room '{}' created", name);
            Room::with_history_limit(name.clone(), created_at, history_limit)
        })
    }

    fn get(&self, name: &RoomName) -> Option<&Room> {
        self.rooms.get(name)
    }

    fn get_mut(&mut self, name: &RoomName) -> Option<&mut Room> {
        self.rooms.get_mut(name)
    }

    fn room_names(&self) -> Vec<RoomName> {
        let mut names: Vec<RoomName> = self.rooms.keys().cloned().collect();
        names.sort();
        names
    }

    fn count(&self) -> usize {
        self.rooms.len()
    }
}
