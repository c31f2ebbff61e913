//! Nickname negotiation, once per session.

use tokio::io::AsyncRead;

use crate::{
    domain::{ClientId, Nickname, PusherChannel, reply},
    usecase::{NicknameError, ProcessorError, ProcessorHandle},
};

use super::line_reader::{LineReader, ReadEvent};

/// Prompt until the client picks a free nickname.
///
/// Returns `None` when the connection ends first or the processor is gone.
pub async fn negotiate_nickname<R>(
    client_id: ClientId,
    lines: &mut LineReader<R>,
    outbound: &PusherChannel,
    processor: &ProcessorHandle,
) -> Option<Nickname>
where
    R: AsyncRead + Unpin,
{
    send(outbound, reply::WELCOME_BANNER).await?;
    send(outbound, reply::NICKNAME_PROMPT).await?;

    loop {
        let candidate = match lines.next_event().await {
            ReadEvent::Line(line) => line,
            ReadEvent::Closed => {
                tracing::info!("Client '{}' closed the connection during onboarding", client_id);
                return None;
            }
            ReadEvent::TimedOut => {
                tracing::info!("Client '{}' timed out during onboarding", client_id);
                return None;
            }
            ReadEvent::Failed(e) => {
                tracing::warn!("Failed to read from client '{}': {}", client_id, e);
                return None;
            }
        };

        match processor.claim_nickname(client_id, candidate).await {
            Ok(nickname) => {
                send(outbound, reply::USAGE).await?;
                return Some(nickname);
            }
            Err(ProcessorError::Nickname(NicknameError::Empty)) => {
                send(outbound, reply::NICKNAME_EMPTY).await?;
            }
            Err(ProcessorError::Nickname(NicknameError::Taken(_))) => {
                send(outbound, reply::NICKNAME_TAKEN).await?;
            }
            Err(e) => {
                tracing::warn!("Onboarding of client '{}' aborted: {}", client_id, e);
                return None;
            }
        }
    }
}

async fn send(outbound: &PusherChannel, content: &str) -> Option<()> {
    outbound.send(content.to_string()).await.ok()
}
