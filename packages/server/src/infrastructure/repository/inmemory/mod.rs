//! InMemory Repository 実装
//!
//! HashMap / HashSet をインメモリ DB として使用します。プロセス終了とともに
//! すべての状態は失われます。

mod client;
mod nickname;
mod room;

pub use client::InMemoryClientRepository;
pub use nickname::InMemoryNicknameRepository;
pub use room::InMemoryRoomRepository;
