use colored::*;

pub const HELP: &str = "\
Commands:
  /new             start a new chat
  /list            show all chats
  /switch <n|id>   open chat number n from the list, or a session id
  /sidebar         show or hide the chat list
  /history         print the current chat again
  /help            show this help
  /quit            exit (Ctrl-D works too)
Anything else is sent as a message. Start with // to send a line beginning with /.";

pub fn display_help() {
    println!("{}", HELP.dimmed());
}

/// Status line printed only in verbose mode
pub fn display_notice(verbose: bool, message: &str) {
    if verbose {
        eprintln!("{}", format!("[saarthi] {}", message).dimmed());
    }
}

pub fn display_warning(message: &str) {
    eprintln!("{} {}", "Warning:".yellow(), message);
}

pub fn display_error(message: &str) {
    eprintln!("{} {}", "Error:".red(), message);
}

pub fn display_title_bar(sidebar_open: bool) {
    let toggle = if sidebar_open { "✕" } else { "☰" };
    println!("{} {}", toggle.dimmed(), "Saarthi Copilot".bold());
}
