//! Utilities shared by the tcpchat server and client binaries.

pub mod logger;
pub mod time;
