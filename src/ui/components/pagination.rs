//! Pagination control: one button per page number.

use std::ops::RangeInclusive;

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Build the pagination line, highlighting the current page.
///
/// No buttons are produced when there are no pages.
pub fn pagination_line(pages: RangeInclusive<usize>, current: usize) -> Line<'static> {
    let mut spans = Vec::new();
    for number in pages {
        if !spans.is_empty() {
            spans.push(Span::raw(" "));
        }
        let style = if number == current {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        spans.push(Span::styled(format!(" {} ", number), style));
    }
    Line::from(spans)
}

/// Render the pagination control centered in `area`.
pub fn render_pagination(
    frame: &mut Frame,
    area: Rect,
    pages: RangeInclusive<usize>,
    current: usize,
) {
    let paragraph = Paragraph::new(pagination_line(pages, current)).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
