use crate::app::{ChatApp, InputState, SendOutcome};
use crate::config::Config;
use crate::error::{Result, SaarthiError};
use crate::ui::{
    display_help, display_notice, display_title_bar, display_warning, render_sidebar, Block,
    MarkdownRenderer, TranscriptView,
};
use colored::*;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// One line of user input, decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    New,
    List,
    Switch(String),
    Sidebar,
    History,
    Help,
    Quit,
    Message(String),
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        // `//text` sends `/text` as a message
        if let Some(escaped) = line.trim_start().strip_prefix("//") {
            return Command::Message(format!("/{}", escaped));
        }
        let Some(rest) = trimmed.strip_prefix('/') else {
            return Command::Message(line.to_string());
        };

        let (name, argument) = match rest.split_once(char::is_whitespace) {
            Some((name, argument)) => (name, argument.trim()),
            None => (rest, ""),
        };
        match name {
            "new" => Command::New,
            "list" | "ls" => Command::List,
            "switch" | "open" if !argument.is_empty() => Command::Switch(argument.to_string()),
            "sidebar" => Command::Sidebar,
            "history" => Command::History,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => Command::Unknown(trimmed.to_string()),
        }
    }
}

fn prompt(state: InputState) -> String {
    match state {
        InputState::Idle => format!("{} ", "›".blue()),
        InputState::Sending => format!("{} ", "Loading...".dimmed()),
    }
}

struct Screen {
    view: TranscriptView,
    sidebar_open: bool,
    verbose: bool,
}

impl Screen {
    fn redraw(&self, app: &ChatApp) {
        println!();
        display_title_bar(self.sidebar_open);
        if self.sidebar_open {
            println!("{}", render_sidebar(app.summaries(), app.active_session()));
        }
        println!("{}", self.view.render(app.transcript()));
    }

    fn print_block(&self, block: Block<'_>) {
        println!("{}", self.view.render_block(block));
    }
}

/// Interactive loop: read a line, map it to a synchronizer operation, draw.
pub async fn run(mut app: ChatApp, config: &Config) -> Result<()> {
    let mut screen = Screen {
        view: TranscriptView::new(MarkdownRenderer::new()),
        sidebar_open: config.sidebar,
        verbose: config.verbose,
    };

    let mut editor = DefaultEditor::new()
        .map_err(|e| SaarthiError::Other(format!("Could not open line editor: {}", e)))?;

    screen.redraw(&app);
    println!("{}", "Type your message, or /help for commands.".dimmed());

    loop {
        let line = match editor.readline(&prompt(app.input_state())) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(SaarthiError::Other(format!("Input error: {}", e))),
        };
        if !line.trim().is_empty() {
            let _ = editor.add_history_entry(line.as_str());
        }

        match Command::parse(&line) {
            Command::New => match app.start_new_session().await {
                Some(id) => {
                    display_notice(screen.verbose, &format!("started session {}", id));
                    screen.redraw(&app);
                }
                None => display_notice(screen.verbose, "could not start a new chat"),
            },
            Command::List => {
                println!("{}", render_sidebar(app.summaries(), app.active_session()));
            }
            Command::Switch(selector) => {
                if let Some(id) = app.resolve_session(&selector) {
                    app.switch_session(&id).await;
                    display_notice(screen.verbose, &format!("switched to session {}", id));
                    screen.redraw(&app);
                }
            }
            Command::Sidebar => {
                screen.sidebar_open = !screen.sidebar_open;
                screen.redraw(&app);
            }
            Command::History => screen.redraw(&app),
            Command::Help => display_help(),
            Command::Quit => break,
            Command::Unknown(command) => {
                display_warning(&format!("unknown command {}, try /help", command));
            }
            Command::Message(text) => send(&mut app, &screen, &text).await,
        }
    }

    Ok(())
}

async fn send(app: &mut ChatApp, screen: &Screen, text: &str) {
    let Some(pending) = app.submit(text) else {
        if app.active_session().is_none() {
            display_notice(screen.verbose, "no active chat, use /new first");
        }
        return;
    };

    let index = pending.turn_index;
    if let Some(turn) = app.transcript().get(index) {
        screen.print_block(Block::Bot(turn));
    }
    println!("{}", prompt(app.input_state()));

    let result = app.dispatch(&pending).await;
    match app.complete(pending, result) {
        SendOutcome::Replied | SendOutcome::Failed(_) => {
            if let Some(turn) = app.transcript().get(index) {
                screen.print_block(Block::Bot(turn));
            }
        }
        SendOutcome::Detached => {}
    }
}
