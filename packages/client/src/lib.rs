//! Terminal client for the tcpchat server.
//!
//! Prints every line the server sends and forwards what the user types.

pub mod error;
pub mod session;
pub mod ui;

pub use error::ClientError;
pub use session::run_client_session;
