//! Contextual key hints for the status bar.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::events::{get_context_hints, KeyContext};

/// Render the key hints for `context`, right-aligned in `area`.
pub fn render_context_help(frame: &mut Frame, area: Rect, context: KeyContext) {
    let line = Line::from(hint_spans(get_context_hints(context)));
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Right), area);
}

/// Split hint text into spans, keys (`[...]`) in cyan and the rest dimmed.
fn hint_spans(hints: &str) -> Vec<Span<'static>> {
    let key_style = Style::default().fg(Color::Cyan);
    let text_style = Style::default().fg(Color::DarkGray);

    let mut spans = Vec::new();
    for (i, segment) in hints.split('[').enumerate() {
        if i == 0 {
            if !segment.is_empty() {
                spans.push(Span::styled(segment.to_string(), text_style));
            }
            continue;
        }
        match segment.split_once(']') {
            Some((key, rest)) => {
                spans.push(Span::styled(format!("[{}]", key), key_style));
                if !rest.is_empty() {
                    spans.push(Span::styled(rest.to_string(), text_style));
                }
            }
            None => spans.push(Span::styled(format!("[{}", segment), text_style)),
        }
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_spans_keys_and_text() {
        let spans = hint_spans("[j/k] row  [e] edit");
        let contents: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(contents, vec!["[j/k]", " row  ", "[e]", " edit"]);
        assert_eq!(spans[0].style.fg, Some(Color::Cyan));
        assert_eq!(spans[1].style.fg, Some(Color::DarkGray));
    }

    #[test]
    fn test_hint_spans_plain_text() {
        let spans = hint_spans("just text");
        assert_eq!(spans.len(), 1);
    }

    #[test]
    fn test_hint_spans_empty() {
        assert!(hint_spans("").is_empty());
    }
}
