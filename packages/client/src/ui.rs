//! UI utilities for the client.

use std::io::Write;

pub const PROMPT: &str = "> ";

/// Print one server line above the prompt
pub fn print_server_line(line: &str) {
    print!("\r{}\n", line);
    redisplay_prompt();
}

/// Redisplay the prompt after receiving a message
pub fn redisplay_prompt() {
    print!("{}", PROMPT);
    std::io::stdout().flush().ok();
}

/// Whether the line asks the server to end the session
pub fn is_quit_command(line: &str) -> bool {
    line.split_whitespace().next() == Some("/quit")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_quit_command() {
        assert!(is_quit_command("/quit"));
        assert!(is_quit_command("  /quit now"));
        assert!(!is_quit_command("/quitting"));
        assert!(!is_quit_command("please /quit"));
        assert!(!is_quit_command(""));
    }
}
