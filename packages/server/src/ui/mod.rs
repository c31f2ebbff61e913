//! TCP front end: connection acceptor and per-connection sessions.

mod error;
mod handler;
mod server;
mod signal;

pub use error::ServerError;
pub use server::Server;
