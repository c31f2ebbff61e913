//! Client session: one reader task and one writer task per connection.
//!
//! The writer task is the only thing that writes to the socket. It drains the
//! client's outbound queue until every sender is gone, which happens once the
//! command processor forgets the client. The reader task runs onboarding,
//! then turns lines into commands for the processor.

use std::{sync::Arc, time::Duration};

use tcpchat_shared::time::Clock;
use tokio::{
    io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufWriter},
    sync::{mpsc, watch},
    task::JoinHandle,
};

use crate::domain::{ClientId, Command, CommandKind, PusherChannel, Timestamp};
use crate::usecase::ProcessorHandle;

use super::{
    line_reader::{LineReader, ReadEvent, translate_line},
    onboarding::negotiate_nickname,
};

/// Per-session settings.
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    pub idle_timeout: Option<Duration>,
    pub max_line_len: usize,
    pub linger: Duration,
}

/// An admitted connection.
pub struct Session {
    client_id: ClientId,
    processor: ProcessorHandle,
    /// Sender used for onboarding replies; the processor holds its own clone.
    outbound: PusherChannel,
    config: SessionConfig,
    /// Stamps commands at translation time
    clock: Arc<dyn Clock>,
    /// Changes (or closes) when the server stops
    shutdown: watch::Receiver<()>,
}

impl Session {
    pub fn new(
        client_id: ClientId,
        processor: ProcessorHandle,
        outbound: PusherChannel,
        config: SessionConfig,
        clock: Arc<dyn Clock>,
        shutdown: watch::Receiver<()>,
    ) -> Self {
        Self {
            client_id,
            processor,
            outbound,
            config,
            clock,
            shutdown,
        }
    }

    /// Serve the connection until it ends or the server stops.
    pub async fn run<R, W>(self, reader: R, writer: W, outbound_rx: mpsc::Receiver<String>)
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let Self {
            client_id,
            processor,
            outbound,
            config,
            clock,
            mut shutdown,
        } = self;

        let mut send_task = pusher_loop(outbound_rx, writer);
        let mut recv_task = tokio::spawn(read_loop(
            client_id,
            LineReader::new(reader, config.idle_timeout, config.max_line_len),
            outbound,
            processor.clone(),
            clock.clone(),
        ));

        tokio::select! {
            _ = &mut recv_task => {
                // Give the writer a moment to flush what is left (the farewell after /quit).
                if tokio::time::timeout(config.linger, &mut send_task).await.is_err() {
                    tracing::debug!("Writer of client '{}' did not finish in time", client_id);
                    send_task.abort();
                }
            }
            _ = &mut send_task => {
                recv_task.abort();
                submit_disconnected(client_id, &processor, clock.as_ref()).await;
            }
            _ = shutdown.changed() => {
                tracing::debug!("Closing session of client '{}' for shutdown", client_id);
                recv_task.abort();
                if tokio::time::timeout(config.linger, &mut send_task).await.is_err() {
                    send_task.abort();
                }
            }
        }

        tracing::info!("Session of client '{}' closed", client_id);
    }
}

/// Spawns the task that writes queued lines to the socket.
///
/// Each queued message is followed by a newline. The socket is shut down
/// once the queue closes or a write fails.
fn pusher_loop<W>(mut rx: mpsc::Receiver<String>, writer: W) -> JoinHandle<()>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut writer = BufWriter::new(writer);
        while let Some(msg) = rx.recv().await {
            let written = async {
                writer.write_all(msg.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await
            }
            .await;
            if let Err(e) = written {
                tracing::debug!("Failed to write to socket: {}", e);
                break;
            }
        }
        let _ = writer.shutdown().await;
    })
}

async fn read_loop<R>(
    client_id: ClientId,
    mut lines: LineReader<R>,
    outbound: PusherChannel,
    processor: ProcessorHandle,
    clock: Arc<dyn Clock>,
) where
    R: AsyncRead + Unpin,
{
    let nickname = negotiate_nickname(client_id, &mut lines, &outbound, &processor).await;
    drop(outbound);
    if nickname.is_none() {
        submit_disconnected(client_id, &processor, clock.as_ref()).await;
        return;
    }

    loop {
        let kind = match lines.next_event().await {
            ReadEvent::Line(line) => translate_line(&line),
            ReadEvent::Closed => {
                tracing::info!("Client '{}' closed the connection", client_id);
                CommandKind::Disconnected
            }
            ReadEvent::TimedOut => {
                tracing::info!("Client '{}' idle for too long, disconnecting", client_id);
                CommandKind::Disconnected
            }
            ReadEvent::Failed(e) => {
                tracing::warn!("Failed to read from client '{}': {}", client_id, e);
                CommandKind::Disconnected
            }
        };

        let command = Command::new(client_id, Timestamp::new(clock.now_millis()), kind);
        let terminal = command.is_terminal();
        if let Err(e) = processor.submit(command).await {
            tracing::warn!("Dropping session of client '{}': {}", client_id, e);
            break;
        }
        if terminal {
            break;
        }
    }
}

async fn submit_disconnected(client_id: ClientId, processor: &ProcessorHandle, clock: &dyn Clock) {
    let command = Command::new(
        client_id,
        Timestamp::new(clock.now_millis()),
        CommandKind::Disconnected,
    );
    if let Err(e) = processor.submit(command).await {
        tracing::debug!("Could not report disconnect of client '{}': {}", client_id, e);
    }
}
