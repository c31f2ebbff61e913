//! メッセージ送信（通知）の実装
//!
//! - `channel`: セッションごとの有界キューに積む実装

pub mod channel;

pub use channel::ChannelMessagePusher;
