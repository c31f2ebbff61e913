//! Repository trait 定義
//!
//! ドメイン層が必要とする状態アクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! ## 所有権
//!
//! リポジトリはコマンドプロセッサだけが所有し、`&mut self` で直接変更する。
//! 共有されないためロックは持たない。

use super::{
    entity::{Client, Room},
    error::RepositoryError,
    value_object::{ClientId, Nickname, RoomName, Timestamp},
};

/// 接続中（オンボーディング中を含む）のクライアント
pub trait ClientRepository: Send + Sync {
    /// クライアントを登録（同じ ID は上書き）
    fn insert(&mut self, client: Client);

    fn get(&self, client_id: &ClientId) -> Option<&Client>;

    fn get_mut(&mut self, client_id: &ClientId) -> Option<&mut Client>;

    /// クライアントを削除して返す
    fn remove(&mut self, client_id: &ClientId) -> Option<Client>;

    /// 接続中のクライアント数（受け入れ上限の判定に使う）
    fn count(&self) -> usize;
}

/// ルーム名 → ルーム
pub trait RoomRepository: Send + Sync {
    /// ルームを取得し、存在しなければ作成する
    fn get_or_create(&mut self, name: &RoomName, created_at: Timestamp) -> &mut Room;

    fn get(&self, name: &RoomName) -> Option<&Room>;

    fn get_mut(&mut self, name: &RoomName) -> Option<&mut Room>;

    /// 既知のルーム名（名前順）
    fn room_names(&self) -> Vec<RoomName>;

    fn count(&self) -> usize;
}

/// 使用中のニックネームの集合
pub trait NicknameRepository: Send + Sync {
    fn is_claimed(&self, nickname: &Nickname) -> bool;

    /// ニックネームを確保（使用中ならエラー）
    fn claim(&mut self, nickname: Nickname) -> Result<(), RepositoryError>;

    /// ニックネームを解放（確保されていなければ false）
    fn release(&mut self, nickname: &Nickname) -> bool;

    fn count(&self) -> usize;
}
