use crate::models::SessionSummary;
use colored::*;

/// The session list, newest last, with the active session marked
pub fn render_sidebar(summaries: &[SessionSummary], active: Option<&str>) -> String {
    let mut output = format!("{}\n", "Chats".bold());
    if summaries.is_empty() {
        output.push_str(&format!("{}\n", "  (no chats yet, /new starts one)".dimmed()));
        return output;
    }

    for (index, summary) in summaries.iter().enumerate() {
        let label = summary.display_title(index);
        let line = format!("{:>3}. {}", index + 1, label);
        if active == Some(summary.session_id.as_str()) {
            output.push_str(&format!("{} {}\n", "▶".blue(), line.white().on_blue()));
        } else {
            output.push_str(&format!("  {}\n", line));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untitled_sessions_are_numbered() {
        colored::control::set_override(false);
        let summaries = vec![
            SessionSummary {
                session_id: "a".to_string(),
                title: "Hi".to_string(),
            },
            SessionSummary::new("b"),
        ];
        let out = render_sidebar(&summaries, Some("b"));
        assert!(out.contains("    1. Hi\n"));
        assert!(out.contains("▶   2. Chat 2\n"));
    }

    #[test]
    fn test_empty_sidebar() {
        colored::control::set_override(false);
        let out = render_sidebar(&[], None);
        assert!(out.contains("no chats yet"));
    }
}
