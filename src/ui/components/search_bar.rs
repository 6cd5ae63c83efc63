//! Search box for filtering records.
//!
//! The table filters live as the user types. Matches are highlighted in the
//! table cells with [`highlight_text`].

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::input::TextInput;

/// Prefix of the search line.
const LABEL: &str = "Search: ";

/// What a key press did to the search box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchAction {
    /// The query changed; the table must re-filter.
    Changed,
    /// Input finished, query kept.
    Accepted,
    /// Input finished, query cleared.
    Cleared,
}

/// Search box state.
#[derive(Debug, Clone, Default)]
pub struct SearchBar {
    /// The query being typed.
    input: TextInput,
    /// Whether the search box has focus.
    active: bool,
}

impl SearchBar {
    /// Create an unfocused, empty search box.
    pub fn new() -> Self {
        Self {
            input: TextInput::new(),
            active: false,
        }
    }

    /// Give the search box focus, keeping the current query.
    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Whether the search box has focus.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The current query.
    pub fn query(&self) -> &str {
        self.input.value()
    }

    /// Handle a key while focused.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<SearchAction> {
        match key.code {
            KeyCode::Enter => {
                self.active = false;
                Some(SearchAction::Accepted)
            }
            KeyCode::Esc => {
                self.active = false;
                self.input.clear();
                Some(SearchAction::Cleared)
            }
            _ => self.input.handle_input(key).then_some(SearchAction::Changed),
        }
    }

    /// Render the search line.
    pub fn render(&self, frame: &mut Frame, area: Rect, match_count: usize) {
        let label_style = if self.active {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let mut spans = vec![Span::styled(LABEL, label_style)];
        if self.input.is_empty() && !self.active {
            spans.push(Span::styled(
                "press / to filter",
                Style::default().fg(Color::DarkGray),
            ));
        } else {
            spans.push(Span::raw(self.input.value().to_string()));
            if !self.input.is_empty() {
                spans.push(Span::styled(
                    format!("  ({} matches)", match_count),
                    Style::default().fg(Color::DarkGray),
                ));
            }
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);

        if self.active {
            let x = area
                .x
                .saturating_add(self.cursor_column())
                .min(area.right().saturating_sub(1));
            frame.set_cursor_position(Position::new(x, area.y));
        }
    }

    /// Terminal column of the input cursor, relative to the line start.
    ///
    /// Counts display width so wide characters move the cursor two cells.
    fn cursor_column(&self) -> u16 {
        let before: String = self.input.value().chars().take(self.input.cursor()).collect();
        let width = Span::raw(LABEL).width() + Span::raw(before).width();
        u16::try_from(width).unwrap_or(u16::MAX)
    }
}

/// Highlight case-insensitive occurrences of `query` inside `text`.
///
/// Non-matching parts keep `base`. Text whose lowercase form changes byte
/// length is returned unhighlighted.
pub fn highlight_text(text: &str, query: &str, base: Style) -> Line<'static> {
    if query.is_empty() {
        return Line::from(Span::styled(text.to_string(), base));
    }

    let text_lower = text.to_lowercase();
    let query_lower = query.to_lowercase();
    if text_lower.len() != text.len() {
        return Line::from(Span::styled(text.to_string(), base));
    }

    let match_style = base
        .bg(Color::Yellow)
        .fg(Color::Black)
        .add_modifier(Modifier::BOLD);

    let mut spans = Vec::new();
    let mut last_end = 0;

    for (start, _) in text_lower.match_indices(&query_lower) {
        let end = start + query_lower.len();
        if !text.is_char_boundary(start) || !text.is_char_boundary(end) {
            return Line::from(Span::styled(text.to_string(), base));
        }
        if start > last_end {
            spans.push(Span::styled(text[last_end..start].to_string(), base));
        }
        spans.push(Span::styled(text[start..end].to_string(), match_style));
        last_end = end;
    }

    if last_end < text.len() {
        spans.push(Span::styled(text[last_end..].to_string(), base));
    }

    Line::from(spans)
}
