//! Toast notifications confirming record operations.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// The kind of notification, which determines its appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    Info,
    Success,
    Warning,
}

impl NotificationType {
    /// Icon shown before the message.
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationType::Info => "ℹ",
            NotificationType::Success => "✓",
            NotificationType::Warning => "⚠",
        }
    }

    /// Foreground and border color.
    pub fn color(&self) -> Color {
        match self {
            NotificationType::Info => Color::Blue,
            NotificationType::Success => Color::Green,
            NotificationType::Warning => Color::Yellow,
        }
    }
}

/// A single notification message.
#[derive(Debug, Clone)]
pub struct Notification {
    /// The message text.
    pub message: String,
    /// Kind of notification, which picks icon and color.
    pub notification_type: NotificationType,
    /// When the notification was created.
    pub created_at: Instant,
    /// How long it stays visible.
    pub duration: Duration,
}

impl Notification {
    pub fn new(
        message: impl Into<String>,
        notification_type: NotificationType,
        duration: Duration,
    ) -> Self {
        Self {
            message: message.into(),
            notification_type,
            created_at: Instant::now(),
            duration,
        }
    }

    /// Info notification shown for 3 seconds.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Info, Duration::from_secs(3))
    }

    /// Success notification shown for 3 seconds.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Success, Duration::from_secs(3))
    }

    /// Warning notification shown for 5 seconds.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Warning, Duration::from_secs(5))
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.duration
    }
}

/// Queue of visible notifications, oldest first.
#[derive(Debug)]
pub struct NotificationManager {
    /// Active notifications, oldest at the front.
    notifications: VecDeque<Notification>,
    /// Maximum shown at once; older ones are dropped.
    max_visible: usize,
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationManager {
    pub fn new() -> Self {
        Self::with_max_visible(3)
    }

    pub fn with_max_visible(max_visible: usize) -> Self {
        Self {
            notifications: VecDeque::new(),
            max_visible,
        }
    }

    /// Add a notification, dropping the oldest past the limit.
    pub fn push(&mut self, notification: Notification) {
        self.notifications.push_back(notification);
        while self.notifications.len() > self.max_visible {
            self.notifications.pop_front();
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Notification::info(message));
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Notification::success(message));
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Notification::warning(message));
    }

    /// Remove expired notifications. Called on every tick.
    pub fn tick(&mut self) {
        self.notifications.retain(|n| !n.is_expired());
    }

    /// Whether there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    /// Active notifications, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    /// Render notifications stacked in the bottom-right corner of `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if self.is_empty() {
            return;
        }

        let width = 44.min(area.width.saturating_sub(4));
        // Borders plus icon and space.
        let inner_width = width.saturating_sub(4).max(1) as usize;

        let heights: Vec<u16> = self
            .iter()
            .map(|n| {
                let text_len = n.message.chars().count() + 2;
                text_len.div_ceil(inner_width) as u16 + 2
            })
            .collect();

        let total_height = heights.iter().sum::<u16>().min(area.height.saturating_sub(2));
        let x = area.x + area.width.saturating_sub(width + 2);
        let y = area.y + area.height.saturating_sub(total_height + 2);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(heights.iter().map(|&h| Constraint::Length(h)))
            .split(Rect::new(x, y, width, total_height));

        for (notification, chunk) in self.iter().zip(chunks.iter()) {
            render_notification(notification, frame, *chunk);
        }
    }
}

fn render_notification(notification: &Notification, frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);

    let style = Style::default().fg(notification.notification_type.color());
    let text = Line::from(vec![
        Span::styled(
            format!("{} ", notification.notification_type.icon()),
            style.add_modifier(Modifier::BOLD),
        ),
        Span::styled(notification.message.clone(), style),
    ]);

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).border_style(style))
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}
