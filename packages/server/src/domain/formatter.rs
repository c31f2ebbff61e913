//! Line formats for room traffic.

use tcpchat_shared::time::format_local_timestamp;

use super::value_object::{Nickname, RoomName, Timestamp};

/// Suffix of the notice broadcast when a client enters a room
pub const JOINED_SUFFIX: &str = " joined the room";

/// Suffix of the notice broadcast when a client leaves a room
pub const LEFT_SUFFIX: &str = " has left the room";

/// Message formatter for room broadcasts and replies
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a chat line: `[<timestamp>][<nickname>]: <text>`
    ///
    /// # Arguments
    ///
    /// * `sent_at` - When the line was read from the sender
    /// * `nickname` - The sender's nickname
    /// * `text` - The text exactly as typed
    pub fn format_chat_line(sent_at: Timestamp, nickname: &Nickname, text: &str) -> String {
        Self::format_chat_line_with(&format_local_timestamp(sent_at.value()), nickname, text)
    }

    /// Same as [`MessageFormatter::format_chat_line`] with a pre-rendered timestamp.
    pub fn format_chat_line_with(timestamp: &str, nickname: &Nickname, text: &str) -> String {
        format!("[{}][{}]: {}", timestamp, nickname, text)
    }

    /// Format the notice shown to a room when someone joins
    pub fn format_joined_notice(nickname: &Nickname) -> String {
        format!("{}{}", nickname, JOINED_SUFFIX)
    }

    /// Format the notice shown to a room when someone leaves
    pub fn format_left_notice(nickname: &Nickname) -> String {
        format!("{}{}", nickname, LEFT_SUFFIX)
    }

    /// Format the reply to `/rooms`
    pub fn format_room_list(room_names: &[RoomName]) -> String {
        if room_names.is_empty() {
            return super::reply::NO_ROOMS.to_string();
        }
        let names: Vec<&str> = room_names.iter().map(RoomName::as_str).collect();
        format!("available rooms: {}", names.join(", "))
    }
}
