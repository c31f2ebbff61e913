//! UseCase error types.

use thiserror::Error;

/// Admission refused by the connection cap
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdmissionError {
    #[error("server is full (max {max_clients} clients)")]
    ServerFull { max_clients: usize },
}

/// Nickname claim refused during onboarding
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NicknameError {
    #[error("nickname cannot be empty")]
    Empty,

    #[error("nickname '{0}' is already taken")]
    Taken(String),

    #[error("client '{0}' is not connected")]
    UnknownClient(String),
}

/// Errors seen by sessions talking to the command processor
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessorError {
    /// The processor task has stopped (server shutting down)
    #[error("command processor is not running")]
    Closed,

    #[error(transparent)]
    Admission(#[from] AdmissionError),

    #[error(transparent)]
    Nickname(#[from] NicknameError),
}
