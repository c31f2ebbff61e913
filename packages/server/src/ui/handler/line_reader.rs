//! Line reader and command translation.

use std::{io, time::Duration};

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};

use crate::domain::CommandKind;

/// What one read produced.
#[derive(Debug)]
pub enum ReadEvent {
    /// A full line, line ending removed
    Line(String),
    /// The peer closed the connection
    Closed,
    /// Nothing arrived within the idle timeout
    TimedOut,
    /// The read failed
    Failed(io::Error),
}

/// Reads newline-delimited lines, one at a time.
///
/// Invalid UTF-8 is replaced rather than treated as an error. A line longer
/// than `max_line_len` bytes (line ending excluded) is reported as
/// [`ReadEvent::Failed`] without buffering the rest of it.
pub struct LineReader<R> {
    reader: BufReader<R>,
    buffer: Vec<u8>,
    idle_timeout: Option<Duration>,
    max_line_len: usize,
}

impl<R> LineReader<R>
where
    R: AsyncRead + Unpin,
{
    pub fn new(reader: R, idle_timeout: Option<Duration>, max_line_len: usize) -> Self {
        Self {
            reader: BufReader::new(reader),
            buffer: Vec::new(),
            idle_timeout,
            max_line_len,
        }
    }

    /// Wait for the next line.
    pub async fn next_event(&mut self) -> ReadEvent {
        self.buffer.clear();
        // One extra byte leaves room for the newline.
        let byte_limit = self.max_line_len.saturating_add(1) as u64;
        let mut bounded = (&mut self.reader).take(byte_limit);
        let read = bounded.read_until(b'\n', &mut self.buffer);
        let result = match self.idle_timeout {
            Some(limit) => match tokio::time::timeout(limit, read).await {
                Ok(result) => result,
                Err(_) => return ReadEvent::TimedOut,
            },
            None => read.await,
        };

        match result {
            Ok(0) => ReadEvent::Closed,
            Ok(_) if !self.buffer.ends_with(b"\n") && self.buffer.len() > self.max_line_len => {
                ReadEvent::Failed(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("line longer than {} bytes", self.max_line_len),
                ))
            }
            Ok(_) => {
                let line = String::from_utf8_lossy(&self.buffer);
                ReadEvent::Line(line.trim_end_matches(['\r', '\n']).to_string())
            }
            Err(e) => ReadEvent::Failed(e),
        }
    }
}

/// Translate one line into a command.
///
/// Only the first whitespace-separated token decides the command; anything
/// that is not a known command is chat text, sent as typed.
pub fn translate_line(line: &str) -> CommandKind {
    let mut tokens = line.split_whitespace();
    match tokens.next() {
        Some("/join") => CommandKind::Join(tokens.next().map(str::to_string)),
        Some("/rooms") => CommandKind::ListRooms,
        Some("/quit") => CommandKind::Quit,
        Some("/name") => CommandKind::Rename(tokens.next().map(str::to_string)),
        _ => CommandKind::SendMessage(line.to_string()),
    }
}
