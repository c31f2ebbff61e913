//! Multi-room TCP chat server.
//!
//! Clients connect with any line-based TCP client (`nc`, `telnet` or
//! `tcpchat-client`), choose a nickname and chat in rooms.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tcpchat-server
//! cargo run --bin tcpchat-server -- 9000 --host 127.0.0.1 --max-clients 20
//! ```

use clap::Parser;
use tcpchat_server::{
    Server, ServerConfig,
    config::{
        DEFAULT_COMMAND_QUEUE_CAPACITY, DEFAULT_HOST, DEFAULT_IDLE_TIMEOUT_SECS,
        DEFAULT_MAX_CLIENTS, DEFAULT_MAX_LINE_LEN, DEFAULT_OUTBOUND_QUEUE_CAPACITY, DEFAULT_PORT,
    },
};
use tcpchat_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "tcpchat-server")]
#[command(about = "Multi-room line chat server over TCP", long_about = None)]
struct Args {
    /// Port number to listen on
    #[arg(value_name = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = DEFAULT_HOST)]
    host: String,

    /// Maximum number of simultaneous connections
    #[arg(short = 'm', long, default_value_t = DEFAULT_MAX_CLIENTS)]
    max_clients: usize,

    /// Disconnect clients idle for this many seconds (0 disables)
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_IDLE_TIMEOUT_SECS)]
    idle_timeout: u64,

    /// Keep only the most recent N lines of each room's history
    #[arg(long, value_name = "N")]
    history_limit: Option<usize>,

    /// Capacity of each client's outbound queue
    #[arg(long, value_name = "N", default_value_t = DEFAULT_OUTBOUND_QUEUE_CAPACITY)]
    outbound_queue: usize,

    /// Capacity of the command processor queue
    #[arg(long, value_name = "N", default_value_t = DEFAULT_COMMAND_QUEUE_CAPACITY)]
    command_queue: usize,

    /// Longest accepted input line in bytes
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_MAX_LINE_LEN)]
    max_line_len: usize,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            max_clients: args.max_clients,
            idle_timeout: ServerConfig::idle_timeout_from_secs(args.idle_timeout),
            history_limit: args.history_limit,
            outbound_queue_capacity: args.outbound_queue.max(1),
            command_queue_capacity: args.command_queue.max(1),
            max_line_len: args.max_line_len.max(1),
            ..ServerConfig::default()
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &["tcpchat_server"], "info");

    let config = ServerConfig::from(args);
    let server = match Server::bind(config).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Server error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
