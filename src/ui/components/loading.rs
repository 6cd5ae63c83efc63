//! Loading indicator shown while the member list is fetched.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

/// Spinner animation frames.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// A loading indicator with an animated spinner.
#[derive(Debug, Clone)]
pub struct LoadingIndicator {
    /// Text shown next to the spinner.
    message: String,
    /// Current index into the spinner frames.
    frame: usize,
    /// Whether the indicator is shown and animating.
    active: bool,
}

impl Default for LoadingIndicator {
    fn default() -> Self {
        Self::with_message("Loading...")
    }
}

impl LoadingIndicator {
    /// Create an inactive indicator with the given message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            frame: 0,
            active: false,
        }
    }

    /// Text shown next to the spinner.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Show the indicator and restart the animation.
    pub fn start(&mut self) {
        self.active = true;
        self.frame = 0;
    }

    /// Hide the indicator.
    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Whether the indicator is shown.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance the spinner. Called on every tick.
    pub fn tick(&mut self) {
        if self.active {
            self.frame = (self.frame + 1) % SPINNER_FRAMES.len();
        }
    }

    /// The current spinner frame.
    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.frame]
    }

    /// Render the spinner and message centered in `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.active {
            return;
        }

        let text = format!("{} {}", self.spinner(), self.message());
        let y = area.y + area.height / 2;
        let line_area = Rect::new(area.x, y.min(area.bottom().saturating_sub(1)), area.width, 1);
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, line_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_only_advances_when_active() {
        let mut loading = LoadingIndicator::with_message("Fetching members...");
        loading.tick();
        assert_eq!(loading.spinner(), SPINNER_FRAMES[0]);

        loading.start();
        loading.tick();
        assert_eq!(loading.spinner(), SPINNER_FRAMES[1]);
    }

    #[test]
    fn test_spinner_wraps() {
        let mut loading = LoadingIndicator::default();
        loading.start();
        for _ in 0..SPINNER_FRAMES.len() {
            loading.tick();
        }
        assert_eq!(loading.spinner(), SPINNER_FRAMES[0]);
    }

    #[test]
    fn test_start_stop() {
        let mut loading = LoadingIndicator::default();
        assert!(!loading.is_active());
        loading.start();
        assert!(loading.is_active());
        loading.stop();
        assert!(!loading.is_active());
        assert_eq!(loading.message(), "Loading...");
    }
}
