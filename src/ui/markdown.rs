use crate::ui::highlight::CodeHighlighter;
use colored::*;
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

const DEFAULT_WIDTH: usize = 60;
const MAX_WIDTH: usize = 100;

/// Width for rules and code frames, following the terminal when known
pub fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(terminal_size::Width(w), _)| w as usize)
        .unwrap_or(DEFAULT_WIDTH)
        .clamp(20, MAX_WIDTH)
}

/// Markdown to styled terminal text.
///
/// Lists render with their markers inline (`•` or `N.`), strong text is
/// bold, emphasis is italic and every top-level paragraph is followed by a
/// blank line.
pub struct MarkdownRenderer {
    highlighter: CodeHighlighter,
    width: usize,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self::with_width(terminal_width())
    }

    pub fn with_width(width: usize) -> Self {
        Self {
            highlighter: CodeHighlighter::new(),
            width,
        }
    }

    pub fn render(&self, markdown: &str) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);

        let mut writer = Writer::new(&self.highlighter, self.width);
        for event in Parser::new_ext(markdown, options) {
            writer.event(event);
        }
        writer.finish()
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

struct CodeBlock {
    lang: Option<String>,
    content: String,
}

struct Writer<'a> {
    highlighter: &'a CodeHighlighter,
    width: usize,
    out: String,
    at_line_start: bool,
    bold: usize,
    italic: usize,
    strike: usize,
    heading: Option<HeadingLevel>,
    quote_depth: usize,
    // `None` for bullets, `Some(next)` for numbered lists
    lists: Vec<Option<u64>>,
    links: Vec<String>,
    code_block: Option<CodeBlock>,
}

impl<'a> Writer<'a> {
    fn new(highlighter: &'a CodeHighlighter, width: usize) -> Self {
        Self {
            highlighter,
            width,
            out: String::new(),
            at_line_start: true,
            bold: 0,
            italic: 0,
            strike: 0,
            heading: None,
            quote_depth: 0,
            lists: Vec::new(),
            links: Vec::new(),
            code_block: None,
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => {
                if let Some(block) = self.code_block.as_mut() {
                    block.content.push_str(&text);
                } else {
                    self.text(&text);
                }
            }
            Event::Code(code) => {
                let styled = code.yellow().to_string();
                self.write(&styled);
            }
            Event::SoftBreak => self.write(" "),
            Event::HardBreak => self.newline(),
            Event::Rule => {
                self.block_break();
                let rule = "─".repeat(self.width).dimmed().to_string();
                self.write(&rule);
                self.newline();
                self.blank_line();
            }
            Event::TaskListMarker(checked) => {
                self.write(if checked { "[x] " } else { "[ ] " });
            }
            Event::Html(html) | Event::InlineHtml(html) => self.text(&html),
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                if self.lists.is_empty() {
                    self.block_break();
                }
            }
            Tag::Heading { level, .. } => {
                self.block_break();
                self.heading = Some(level);
            }
            Tag::BlockQuote(_) => {
                self.block_break();
                self.quote_depth += 1;
            }
            Tag::CodeBlock(kind) => {
                self.block_break();
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(|lang| lang.to_string()),
                    CodeBlockKind::Indented => None,
                };
                self.code_block = Some(CodeBlock {
                    lang,
                    content: String::new(),
                });
            }
            Tag::List(start) => {
                if self.lists.is_empty() {
                    self.block_break();
                } else {
                    self.line_break();
                }
                self.lists.push(start);
            }
            Tag::Item => {
                self.line_break();
                let depth = self.lists.len().saturating_sub(1);
                let marker = match self.lists.last_mut() {
                    Some(Some(next)) => {
                        let marker = format!("{}.", next);
                        *next += 1;
                        marker
                    }
                    _ => "•".to_string(),
                };
                self.write_prefix();
                self.out.push_str(&"  ".repeat(depth));
                self.out.push_str(&marker);
                self.out.push(' ');
                self.at_line_start = false;
            }
            Tag::Emphasis => self.italic += 1,
            Tag::Strong => self.bold += 1,
            Tag::Strikethrough => self.strike += 1,
            Tag::Link { dest_url, .. } => self.links.push(dest_url.to_string()),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                self.newline();
                if self.lists.is_empty() {
                    self.blank_line();
                }
            }
            TagEnd::Heading(_) => {
                self.heading = None;
                self.newline();
                self.blank_line();
            }
            TagEnd::BlockQuote(_) => {
                self.quote_depth = self.quote_depth.saturating_sub(1);
            }
            TagEnd::CodeBlock => {
                if let Some(block) = self.code_block.take() {
                    let rendered = self.highlighter.render_block(
                        &block.content,
                        block.lang.as_deref(),
                        self.width,
                    );
                    for line in rendered.lines() {
                        self.write(line);
                        self.newline();
                    }
                    self.blank_line();
                }
            }
            TagEnd::List(_) => {
                self.lists.pop();
                self.line_break();
                if self.lists.is_empty() {
                    self.blank_line();
                }
            }
            TagEnd::Item => self.line_break(),
            TagEnd::Emphasis => self.italic = self.italic.saturating_sub(1),
            TagEnd::Strong => self.bold = self.bold.saturating_sub(1),
            TagEnd::Strikethrough => self.strike = self.strike.saturating_sub(1),
            TagEnd::Link => {
                if let Some(url) = self.links.pop() {
                    let suffix = format!(" ({})", url).dimmed().to_string();
                    self.write(&suffix);
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        let mut lines = text.split('\n').peekable();
        while let Some(line) = lines.next() {
            if !line.is_empty() {
                let styled = self.style(line);
                self.write(&styled);
            }
            if lines.peek().is_some() {
                self.newline();
            }
        }
    }

    fn style(&self, text: &str) -> String {
        let mut styled = text.normal();
        if self.bold > 0 || self.heading.is_some() {
            styled = styled.bold();
        }
        if self.italic > 0 {
            styled = styled.italic();
        }
        if self.strike > 0 {
            styled = styled.strikethrough();
        }
        if matches!(self.heading, Some(HeadingLevel::H1 | HeadingLevel::H2)) {
            styled = styled.underline();
        }
        if !self.links.is_empty() {
            styled = styled.underline().blue();
        }
        styled.to_string()
    }

    fn write_prefix(&mut self) {
        for _ in 0..self.quote_depth {
            self.out.push_str(&"│ ".dimmed().to_string());
        }
    }

    fn write(&mut self, text: &str) {
        if self.at_line_start {
            self.write_prefix();
            if !self.lists.is_empty() {
                // Continuation lines sit under the item text
                self.out.push_str(&"  ".repeat(self.lists.len()));
            }
            self.at_line_start = false;
        }
        self.out.push_str(text);
    }

    fn newline(&mut self) {
        self.out.push('\n');
        self.at_line_start = true;
    }

    /// End the current line if anything is on it
    fn line_break(&mut self) {
        if !self.at_line_start {
            self.newline();
        }
    }

    fn blank_line(&mut self) {
        self.line_break();
        if !self.out.is_empty() && !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }

    /// Separate a new block from whatever came before it
    fn block_break(&mut self) {
        self.line_break();
    }

    fn finish(self) -> String {
        self.out.trim_end_matches('\n').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(markdown: &str) -> String {
        colored::control::set_override(false);
        MarkdownRenderer::with_width(20).render(markdown)
    }

    #[test]
    fn test_paragraphs_are_separated_by_blank_line() {
        let out = render("First paragraph.\n\nSecond paragraph.");
        assert_eq!(out, "First paragraph.\n\nSecond paragraph.");
    }

    #[test]
    fn test_unordered_list_uses_bullets() {
        let out = render("- apples\n- pears");
        assert_eq!(out, "• apples\n• pears");
    }

    #[test]
    fn test_ordered_list_keeps_start_number() {
        let out = render("3. three\n4. four");
        assert_eq!(out, "3. three\n4. four");
    }

    #[test]
    fn test_nested_list_is_indented() {
        let out = render("- outer\n  - inner");
        assert_eq!(out, "• outer\n  • inner");
    }

    #[test]
    fn test_strong_and_emphasis_keep_text() {
        let out = render("This is **bold** and *soft*.");
        assert_eq!(out, "This is bold and soft.");
    }

    #[test]
    fn test_fenced_code_is_framed() {
        let out = render("```rust\nfn main() {}\n```");
        assert!(out.starts_with("┌─[rust]"));
        assert!(out.contains("fn main() {}"));
        assert!(out.lines().last().unwrap().starts_with('└'));
    }

    #[test]
    fn test_link_shows_url() {
        let out = render("See [docs](https://example.com).");
        assert_eq!(out, "See docs (https://example.com).");
    }

    #[test]
    fn test_placeholder_passes_through() {
        assert_eq!(render("..."), "...");
    }
}
