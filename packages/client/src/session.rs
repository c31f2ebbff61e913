//! TCP client session management.

use std::time::Duration;

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::TcpStream,
    sync::mpsc,
};

use super::{
    error::ClientError,
    ui::{PROMPT, is_quit_command, print_server_line},
};

/// How long to keep reading after `/quit` so the farewell gets printed
const QUIT_GRACE: Duration = Duration::from_secs(2);

/// Run one chat session until the server closes it or the user leaves
pub async fn run_client_session(host: &str, port: u16) -> Result<(), ClientError> {
    let addr = format!("{}:{}", host, port);
    let stream = TcpStream::connect(&addr)
        .await
        .map_err(|e| ClientError::ConnectionError(format!("{}: {}", addr, e)))?;
    tracing::info!("Connected to chat server at {}", addr);

    let (reader, mut writer) = stream.into_split();

    // Spawn a task to print everything the server sends
    let mut read_task = tokio::spawn(async move {
        let mut lines = BufReader::new(reader).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => print_server_line(&line),
                Ok(None) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!("Read error: {}", e);
                    break;
                }
            }
        }
    });

    // Create channel for rustyline input
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // Spawn a blocking thread for rustyline (synchronous readline)
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(PROMPT) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        rl.add_history_entry(line.as_str()).ok();
                    }
                    if input_tx.send(line).is_err() {
                        // Channel closed, exit thread
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    // Spawn a task to send typed lines to the server
    let mut write_task = tokio::spawn(async move {
        while let Some(line) = input_rx.recv().await {
            writer.write_all(line.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            if is_quit_command(&line) {
                break;
            }
        }
        Ok::<(), std::io::Error>(())
    });

    // If any one of the tasks completes, stop the other
    tokio::select! {
        _ = &mut read_task => write_task.abort(),
        result = &mut write_task => {
            if tokio::time::timeout(QUIT_GRACE, &mut read_task).await.is_err() {
                read_task.abort();
            }
            if let Ok(Err(e)) = result {
                return Err(ClientError::Io(e));
            }
        }
    }

    Ok(())
}
