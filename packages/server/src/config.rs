//! Server configuration.

use std::time::Duration;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8989;
pub const DEFAULT_MAX_CLIENTS: usize = 9;
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;
pub const DEFAULT_OUTBOUND_QUEUE_CAPACITY: usize = 256;
pub const DEFAULT_COMMAND_QUEUE_CAPACITY: usize = 1024;
pub const DEFAULT_MAX_LINE_LEN: usize = 4096;
pub const DEFAULT_LINGER: Duration = Duration::from_secs(2);

/// Runtime settings of the chat server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Live connections allowed at once, onboarding ones included
    pub max_clients: usize,
    /// Disconnect a client that sends nothing for this long
    pub idle_timeout: Option<Duration>,
    /// Lines kept per room; `None` keeps everything
    pub history_limit: Option<usize>,
    /// Capacity of each client's outbound queue
    pub outbound_queue_capacity: usize,
    /// Capacity of the queue feeding the command processor
    pub command_queue_capacity: usize,
    /// Longest accepted input line in bytes; longer lines drop the connection
    pub max_line_len: usize,
    /// How long a closing session waits for pending output
    pub linger: Duration,
}

impl ServerConfig {
    /// Address to bind, `host:port`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Idle timeout from a number of seconds, `0` meaning no timeout.
    pub fn idle_timeout_from_secs(secs: u64) -> Option<Duration> {
        (secs > 0).then(|| Duration::from_secs(secs))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_clients: DEFAULT_MAX_CLIENTS,
            idle_timeout: Self::idle_timeout_from_secs(DEFAULT_IDLE_TIMEOUT_SECS),
            history_limit: None,
            outbound_queue_capacity: DEFAULT_OUTBOUND_QUEUE_CAPACITY,
            command_queue_capacity: DEFAULT_COMMAND_QUEUE_CAPACITY,
            max_line_len: DEFAULT_MAX_LINE_LEN,
            linger: DEFAULT_LINGER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:8989");
        assert_eq!(config.max_clients, 9);
        assert_eq!(config.idle_timeout, Some(Duration::from_secs(600)));
        assert_eq!(config.history_limit, None);
        assert_eq!(config.max_line_len, 4096);
    }

    #[test]
    fn test_zero_idle_timeout_disables_it() {
        assert_eq!(ServerConfig::idle_timeout_from_secs(0), None);
        assert_eq!(
            ServerConfig::idle_timeout_from_secs(30),
            Some(Duration::from_secs(30))
        );
    }
}
