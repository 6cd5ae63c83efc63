//! Help panel listing the keyboard shortcuts.
//!
//! Opened with '?' and closed with '?', 'q', or Escape. Scrolls when the
//! terminal is too short to show every section.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Actions that can be returned from the help view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpAction {
    Close,
}

/// Shortcut sections: title, then (keys, description) pairs.
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Table",
        &[
            ("j / ↓", "Next row"),
            ("k / ↑", "Previous row"),
            ("g / G", "First / last row on the page"),
            ("l / → / n", "Next page"),
            ("h / ← / p", "Previous page"),
            ("1-9", "Jump to page"),
            ("Space", "Select or deselect row"),
            ("a", "Select or deselect every row on the page"),
            ("e", "Edit row"),
            ("d / Delete", "Delete row"),
        ],
    ),
    (
        "Search",
        &[
            ("/", "Focus search"),
            ("Enter", "Keep the filter and return to the table"),
            ("Esc", "Clear the filter"),
        ],
    ),
    (
        "Editing",
        &[
            ("Tab / Shift+Tab", "Next / previous field"),
            ("Enter", "Save the row"),
            ("Esc", "Discard the changes"),
        ],
    ),
    (
        "General",
        &[("?", "Toggle this help"), ("q", "Quit"), ("Ctrl+C", "Quit")],
    ),
];

/// The help panel view.
#[derive(Debug, Default)]
pub struct HelpView {
    scroll: usize,
    /// Updated on render.
    visible_height: usize,
}

impl HelpView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset_scroll(&mut self) {
        self.scroll = 0;
    }

    fn total_lines() -> usize {
        // Header and blank line, the bindings, a trailing blank; then the footer.
        SECTIONS
            .iter()
            .map(|(_, bindings)| bindings.len() + 3)
            .sum::<usize>()
            + 1
    }

    fn max_scroll(&self) -> usize {
        Self::total_lines().saturating_sub(self.visible_height)
    }

    pub fn handle_input(&mut self, key_event: KeyEvent) -> Option<HelpAction> {
        match (key_event.code, key_event.modifiers) {
            (KeyCode::Char('?'), _)
            | (KeyCode::Char('q'), KeyModifiers::NONE)
            | (KeyCode::Esc, _) => Some(HelpAction::Close),

            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                self.scroll = (self.scroll + 1).min(self.max_scroll());
                None
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                self.scroll = self.scroll.saturating_sub(1);
                None
            }
            (KeyCode::Char('g'), KeyModifiers::NONE) => {
                self.scroll = 0;
                None
            }
            (KeyCode::Char('G'), _) => {
                self.scroll = self.max_scroll();
                None
            }
            _ => None,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(" Help - Keyboard Shortcuts ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.visible_height = inner.height as usize;

        let paragraph = Paragraph::new(Self::content_lines()).scroll((self.scroll as u16, 0));
        frame.render_widget(paragraph, inner);

        if Self::total_lines() > self.visible_height {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("▲"))
                .end_symbol(Some("▼"));
            let mut state = ScrollbarState::new(self.max_scroll()).position(self.scroll);
            frame.render_stateful_widget(scrollbar, inner, &mut state);
        }
    }

    fn content_lines() -> Vec<Line<'static>> {
        let mut lines = Vec::with_capacity(Self::total_lines());

        for (title, bindings) in SECTIONS {
            lines.push(Line::from(Span::styled(
                format!("── {} ──", title),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
            for (keys, description) in bindings.iter() {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{:>16}", keys),
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::raw(*description),
                ]));
            }
            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled(
            "Press ?, q, or Esc to close",
            Style::default().fg(Color::DarkGray),
        )));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_close_keys() {
        let mut view = HelpView::new();
        assert_eq!(view.handle_input(key(KeyCode::Char('?'))), Some(HelpAction::Close));
        assert_eq!(view.handle_input(key(KeyCode::Char('q'))), Some(HelpAction::Close));
        assert_eq!(view.handle_input(key(KeyCode::Esc)), Some(HelpAction::Close));
    }

    #[test]
    fn test_content_line_count_matches_total() {
        assert_eq!(HelpView::content_lines().len(), HelpView::total_lines());
    }

    #[test]
    fn test_scroll_is_bounded() {
        let mut view = HelpView::new();
        view.visible_height = 10;
        for _ in 0..200 {
            view.handle_input(key(KeyCode::Char('j')));
        }
        assert_eq!(view.scroll, view.max_scroll());

        for _ in 0..200 {
            view.handle_input(key(KeyCode::Char('k')));
        }
        assert_eq!(view.scroll, 0);
    }

    #[test]
    fn test_go_bottom_then_reset() {
        let mut view = HelpView::new();
        view.visible_height = 5;
        view.handle_input(key(KeyCode::Char('G')));
        assert!(view.scroll > 0);
        view.reset_scroll();
        assert_eq!(view.scroll, 0);
    }
}
