//! Domain error types.

use thiserror::Error;

/// Validation errors raised when constructing value objects
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    /// Nickname is empty or whitespace-only
    #[error("nickname cannot be empty")]
    EmptyNickname,

    /// Room name is empty or whitespace-only
    #[error("room name cannot be empty")]
    EmptyRoomName,
}

/// Errors raised by repositories
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// Nickname is already held by another client
    #[error("nickname '{0}' is already claimed")]
    NicknameAlreadyClaimed(String),
}

/// Errors raised when pushing a line to a client's outbound queue
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// No outbound queue registered for the client
    #[error("client '{0}' is not registered")]
    ClientNotFound(String),

    /// The client's outbound queue is full
    #[error("outbound queue of client '{0}' is full")]
    QueueFull(String),

    /// The client's writer has already stopped
    #[error("client '{0}' is disconnected")]
    Disconnected(String),
}
