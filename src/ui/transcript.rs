use crate::models::{Turn, TurnStatus};
use crate::ui::markdown::MarkdownRenderer;
use colored::*;

/// One visual block of the transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block<'a> {
    User(&'a str),
    Bot(&'a Turn),
}

/// User block then bot block for every turn, in order.
///
/// The iterator is lazy and can be cloned to walk the transcript again.
pub fn turn_blocks(turns: &[Turn]) -> impl Iterator<Item = Block<'_>> + Clone {
    turns
        .iter()
        .flat_map(|turn| [Block::User(&turn.query), Block::Bot(turn)])
}

pub struct TranscriptView {
    markdown: MarkdownRenderer,
}

impl TranscriptView {
    pub fn new(markdown: MarkdownRenderer) -> Self {
        Self { markdown }
    }

    pub fn render(&self, turns: &[Turn]) -> String {
        if turns.is_empty() {
            return welcome_banner();
        }
        turn_blocks(turns)
            .map(|block| self.render_block(block))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn render_block(&self, block: Block<'_>) -> String {
        match block {
            Block::User(query) => {
                format!("{} {}\n{}\n", "●".blue(), "You".blue().bold(), indent(query))
            }
            Block::Bot(turn) => {
                let header = format!("{} {}", "◆".green(), "Saarthi".green().bold());
                let body = match &turn.status {
                    TurnStatus::Pending => turn.response.dimmed().to_string(),
                    TurnStatus::Committed => self.markdown.render(&turn.response),
                    TurnStatus::Failed(reason) => format!(
                        "{}\n{}",
                        turn.response.dimmed(),
                        format!("✗ No response: {}", reason).red()
                    ),
                };
                format!("{}\n{}\n", header, indent(&body))
            }
        }
    }
}

pub fn welcome_banner() -> String {
    format!(
        "{}\n{}\n",
        "🤖 Welcome to Saarthi Copilot!".blue().bold(),
        "How may I assist you today?"
    )
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("  {}", line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> TranscriptView {
        colored::control::set_override(false);
        TranscriptView::new(MarkdownRenderer::with_width(20))
    }

    #[test]
    fn test_blocks_alternate_user_and_bot() {
        let turns = vec![Turn::committed("hi", "hello"), Turn::committed("how?", "fine")];
        let blocks: Vec<_> = turn_blocks(&turns).collect();
        assert_eq!(blocks.len(), 4);
        assert_eq!(blocks[0], Block::User("hi"));
        assert_eq!(blocks[1], Block::Bot(&turns[0]));
        assert_eq!(blocks[2], Block::User("how?"));
        assert_eq!(blocks[3], Block::Bot(&turns[1]));
    }

    #[test]
    fn test_blocks_can_be_walked_twice() {
        let turns = vec![Turn::committed("hi", "hello")];
        let blocks = turn_blocks(&turns);
        let first: Vec<_> = blocks.clone().collect();
        let second: Vec<_> = blocks.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_transcript_shows_welcome() {
        let out = view().render(&[]);
        assert!(out.contains("Welcome to Saarthi Copilot!"));
    }

    #[test]
    fn test_pending_turn_shows_placeholder() {
        let out = view().render(&[Turn::pending("hi")]);
        assert!(out.contains("  hi"));
        assert!(out.contains("  ..."));
    }

    #[test]
    fn test_failed_turn_shows_reason() {
        let mut turn = Turn::pending("hi");
        turn.fail("Request timeout");
        let out = view().render(&[turn]);
        assert!(out.contains("✗ No response: Request timeout"));
    }

    #[test]
    fn test_bot_markdown_is_rendered() {
        let out = view().render(&[Turn::committed("list?", "- a\n- b")]);
        assert!(out.contains("  • a\n  • b"));
    }
}
