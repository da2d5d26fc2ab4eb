use colored::*;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Style, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::{as_24_bit_terminal_escaped, LinesWithEndings};

const THEME: &str = "Solarized (dark)";

/// Syntax highlighting for fenced code in bot replies
pub struct CodeHighlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl CodeHighlighter {
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    pub fn highlight(&self, code: &str, lang: Option<&str>) -> String {
        // Escape codes would end up verbatim in pipes and test output
        if !colored::control::SHOULD_COLORIZE.should_colorize() {
            return code.to_string();
        }
        let Some(theme) = self.theme_set.themes.get(THEME) else {
            return code.to_string();
        };

        let syntax = lang
            .and_then(|lang| {
                self.syntax_set
                    .find_syntax_by_token(lang)
                    .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            })
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let mut highlighter = HighlightLines::new(syntax, theme);
        let mut output = String::new();

        for line in LinesWithEndings::from(code) {
            match highlighter.highlight_line(line, &self.syntax_set) {
                Ok(ranges) => {
                    let ranges: Vec<(Style, &str)> = ranges;
                    output.push_str(&as_24_bit_terminal_escaped(&ranges, false));
                }
                Err(_) => output.push_str(line),
            }
        }
        if !output.is_empty() {
            output.push_str("\x1b[0m");
        }

        output
    }

    /// A highlighted code block inside a `┌─[lang]` / `└─` frame
    pub fn render_block(&self, code: &str, lang: Option<&str>, width: usize) -> String {
        let label = lang.filter(|l| !l.is_empty()).unwrap_or("code");
        let header_fill = width.saturating_sub(label.chars().count() + 4).max(4);
        let mut output = format!(
            "{}[{}]{}\n",
            "┌─".dimmed(),
            label.cyan(),
            "─".repeat(header_fill).dimmed()
        );

        let mut body = self.highlight(code, lang);
        if !body.is_empty() && !code.ends_with('\n') {
            body.push('\n');
        }
        output.push_str(&body);
        let footer = format!("└{}", "─".repeat(width.saturating_sub(1).max(4)));
        output.push_str(&format!("{}\n", footer.dimmed()));
        output
    }
}

impl Default for CodeHighlighter {
    fn default() -> Self {
        Self::new()
    }
}
