//! Connection acceptor.

use std::{future::Future, net::SocketAddr, sync::Arc};

use tcpchat_shared::time::{Clock, SystemClock};
use tokio::{
    io::AsyncWriteExt,
    net::{TcpListener, TcpStream},
    sync::{mpsc, watch},
};

use crate::{
    config::ServerConfig,
    domain::{ClientIdFactory, reply},
    infrastructure::message_pusher::ChannelMessagePusher,
    usecase::{ChatState, CommandProcessor, ProcessorError, ProcessorHandle, processor},
};

use super::{
    error::ServerError,
    handler::{Session, SessionConfig},
    signal::shutdown_signal,
};

/// TCP chat server
///
/// # Example
///
/// ```ignore
/// let server = Server::bind(ServerConfig::default()).await?;
/// server.run().await?;
/// ```
pub struct Server {
    listener: TcpListener,
    config: ServerConfig,
}

impl Server {
    /// Bind the listening socket.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Bind`] if the address cannot be bound.
    pub async fn bind(config: ServerConfig) -> Result<Self, ServerError> {
        let addr = config.bind_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        Ok(Self { listener, config })
    }

    /// Address actually bound (useful with port 0).
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn run(self) -> Result<(), ServerError> {
        self.run_until(shutdown_signal()).await
    }

    /// Serve until `shutdown` resolves.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()>,
    {
        // Initialize dependencies in order:
        // 1. MessagePusher
        // 2. State and command processor
        // 3. Accept loop
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let message_pusher = Arc::new(ChannelMessagePusher::new());
        let state = ChatState::in_memory(self.config.history_limit);
        let command_processor = CommandProcessor::new(
            state,
            message_pusher,
            clock.clone(),
            self.config.max_clients,
        );
        // Dropping the sender tells every session to close.
        let (shutdown_tx, shutdown_rx) = watch::channel(());
        let (handle, receiver) = processor::channel(self.config.command_queue_capacity);
        let processor_task = tokio::spawn(command_processor.run(receiver));

        tracing::info!("Chat server listening on {}", self.local_addr()?);
        tracing::info!(
            "Accepting up to {} clients. Press Ctrl+C to shutdown gracefully",
            self.config.max_clients
        );

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        self.admit(stream, peer, &handle, &clock, &shutdown_rx).await
                    }
                    Err(e) => tracing::warn!("Failed to accept connection: {}", e),
                },
            }
        }

        // Dropping the state closes the queues of onboarded clients; the
        // shutdown signal reaches sessions still onboarding.
        processor_task.abort();
        drop(shutdown_tx);
        tracing::info!("Server shutdown complete");

        Ok(())
    }

    async fn admit(
        &self,
        stream: TcpStream,
        peer: SocketAddr,
        handle: &ProcessorHandle,
        clock: &Arc<dyn Clock>,
        shutdown: &watch::Receiver<()>,
    ) {
        let client_id = ClientIdFactory::generate();
        let (outbound, outbound_rx) = mpsc::channel(self.config.outbound_queue_capacity);

        match handle.admit(client_id, outbound.clone()).await {
            Ok(()) => {
                tracing::info!("Client '{}' connected from {}", client_id, peer);
                let session = Session::new(
                    client_id,
                    handle.clone(),
                    outbound,
                    SessionConfig {
                        idle_timeout: self.config.idle_timeout,
                        max_line_len: self.config.max_line_len,
                        linger: self.config.linger,
                    },
                    clock.clone(),
                    shutdown.clone(),
                );
                let (reader, writer) = stream.into_split();
                tokio::spawn(session.run(reader, writer, outbound_rx));
            }
            Err(ProcessorError::Admission(e)) => {
                tracing::warn!("Rejected connection from {}: {}", peer, e);
                tokio::spawn(reject(stream, reply::server_full(self.config.max_clients)));
            }
            Err(e) => {
                tracing::error!("Cannot admit connection from {}: {}", peer, e);
            }
        }
    }
}

async fn reject(mut stream: TcpStream, notice: String) {
    let written = async {
        stream.write_all(notice.as_bytes()).await?;
        stream.write_all(b"\n").await?;
        stream.shutdown().await
    }
    .await;
    if let Err(e) = written {
        tracing::debug!("Failed to send rejection notice: {}", e);
    }
}
