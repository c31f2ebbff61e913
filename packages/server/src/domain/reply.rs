//! Fixed texts sent to clients.

pub const WELCOME_BANNER: &str = r"Welcome to TCP-Chat!
   ______________
  |  __________  |
  | |  hello!  | |
  | |__________| |
  |______  ______|
         \/";

pub const NICKNAME_PROMPT: &str = "[ENTER YOUR NAME]:";

pub const NICKNAME_EMPTY: &str = "[The name cannot be empty, enter another one]:";

pub const NICKNAME_TAKEN: &str = "[The name is already taken, enter another one]:";

pub const USAGE: &str = "How to use:
To create or join a room: [/join <room name>]
To list the available rooms: [/rooms]
To change your name: [/name <new name>]
To leave: [/quit]";

pub const SERVER_FULL_PREFIX: &str = "Server is full";

pub const JOIN_USAGE: &str = "room name is required. usage: /join ROOM_NAME";

pub const NO_ROOMS: &str = "no rooms yet. usage: /join ROOM_NAME";

pub const FIRST_JOIN: &str = "first join or create a room, usage: /join ROOM_NAME";

pub const EMPTY_MESSAGE: &str = "empty message was not sent";

pub const RENAME_USAGE: &str = "new name is required. usage: /name NEW_NAME";

pub const RENAME_TAKEN: &str = "[The name is already taken, try another one]";

pub const RENAME_SUCCESS: &str = "[SUCCESS]";

pub const FAREWELL: &str = "sad to see you go =(";

/// Notice written to connections refused by the admission cap.
pub fn server_full(max_clients: usize) -> String {
    format!(
        "{} (max {} clients), try again later",
        SERVER_FULL_PREFIX, max_clients
    )
}
