//! Terminal client for the multi-room TCP chat server.
//!
//! Prints every line the server sends and forwards each typed line.
//! Exits when the server closes the connection, on Ctrl+C / Ctrl+D, or
//! after `/quit`.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tcpchat-client
//! cargo run --bin tcpchat-client -- --host 192.168.0.10 --port 9000
//! ```

use clap::Parser;

use tcpchat_client::run_client_session;
use tcpchat_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "tcpchat-client")]
#[command(about = "Terminal client for the multi-room TCP chat server", long_about = None)]
struct Args {
    /// Server host
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Server port
    #[arg(short = 'p', long, default_value_t = 8989)]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &["tcpchat_client"], "warn");

    let args = Args::parse();

    if let Err(e) = run_client_session(&args.host, args.port).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
