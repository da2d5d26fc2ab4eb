pub mod highlight;
pub mod markdown;
pub mod output;
pub mod sidebar;
pub mod transcript;

pub use markdown::MarkdownRenderer;
pub use output::{display_error, display_help, display_notice, display_title_bar, display_warning};
pub use sidebar::render_sidebar;
pub use transcript::{turn_blocks, Block, TranscriptView};
