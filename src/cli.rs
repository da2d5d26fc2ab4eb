use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "saarthi")]
#[command(about = "Terminal chat client for the Saarthi Copilot backend", long_about = None)]
pub struct Args {
    #[arg(
        long = "base-url",
        help = "Backend base URL (e.g., http://localhost:5000)"
    )]
    pub base_url: Option<String>,

    #[arg(long = "timeout", help = "Request timeout in seconds")]
    pub timeout_secs: Option<u64>,

    #[arg(long = "data-dir", help = "Directory holding the local chat list")]
    pub data_dir: Option<PathBuf>,

    #[arg(short = 'n', long = "new", help = "Start a new chat at launch")]
    pub new_session: bool,

    #[arg(
        short = 's',
        long = "session",
        help = "Open this session id at launch",
        conflicts_with = "new_session"
    )]
    pub session: Option<String>,

    #[arg(long = "list", help = "Print known chats and exit")]
    pub list: bool,

    #[arg(long = "clear", help = "Forget all local chats and exit")]
    pub clear: bool,

    #[arg(long = "ephemeral", help = "Keep the chat list in memory only")]
    pub ephemeral: bool,

    #[arg(long = "no-sidebar", help = "Hide the chat list at launch")]
    pub no_sidebar: bool,

    #[arg(short = 'v', long = "verbose", help = "Log requests and state changes")]
    pub verbose: bool,
}
