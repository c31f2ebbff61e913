//! Domain layer: value objects, entities, commands and the interfaces the
//! use cases depend on.

pub mod command;
pub mod entity;
pub mod error;
pub mod formatter;
pub mod message_pusher;
pub mod reply;
pub mod repository;
pub mod value_object;

pub use command::{Command, CommandKind};
pub use entity::{Client, Room};
pub use error::{MessagePushError, RepositoryError, ValueObjectError};
pub use formatter::MessageFormatter;
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::{ClientRepository, NicknameRepository, RoomRepository};
pub use value_object::{ClientId, ClientIdFactory, Nickname, RoomName, Timestamp};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
