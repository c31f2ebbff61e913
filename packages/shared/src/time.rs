//! Time-related utilities with clock abstraction for testability.

use chrono::{DateTime, Local, Utc};

/// Display format used for chat lines (`2024-01-31 13:05:09`).
pub const CHAT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get current Unix timestamp (milliseconds)
    fn now_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        get_timestamp()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: i64,
}

impl FixedClock {
    /// Create a new fixed clock with the given timestamp
    pub fn new(fixed_time_millis: i64) -> Self {
        Self {
            fixed_time: fixed_time_millis,
        }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.fixed_time
    }
}

/// Get current Unix timestamp (milliseconds)
pub fn get_timestamp() -> i64 {
    Utc::now().timestamp_millis()
}

/// Format a Unix timestamp (milliseconds) in the server's local time zone.
///
/// Out-of-range timestamps render as an empty string.
pub fn format_local_timestamp(timestamp_millis: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_millis)
        .map(|dt| dt.with_timezone(&Local).format(CHAT_TIMESTAMP_FORMAT).to_string())
        .unwrap_or_default()
}
