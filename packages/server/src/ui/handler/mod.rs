//! Per-connection handlers.

mod line_reader;
mod onboarding;
mod session;

pub use session::{Session, SessionConfig};
