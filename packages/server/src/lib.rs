//! Multi-room line chat server over raw TCP.
//!
//! Clients pick a nickname, join or create rooms and exchange
//! newline-delimited text with the other members of their room.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;

pub use config::ServerConfig;
pub use ui::{Server, ServerError};
