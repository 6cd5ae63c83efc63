//! Main application state and event loop.
//!
//! This module implements The Elm Architecture (TEA) pattern for predictable
//! state management in the TUI application.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tracing::{debug, error, info, trace};

use crate::error::AppError;
use crate::events::{Event, KeyContext};
use crate::tasks::TaskMessage;
use crate::ui::{
    render_context_help, HelpAction, HelpView, LoadingIndicator, NotificationManager, TableAction,
    TableView,
};

/// The current screen of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Waiting for the member list.
    #[default]
    Loading,
    /// Displaying the member table.
    Table,
    /// Help screen is displayed.
    Help,
    /// Application is in the process of exiting.
    Exiting,
}

/// The main application struct that holds all state.
///
/// This implements the Model part of The Elm Architecture (TEA).
pub struct App {
    /// The current screen.
    state: AppState,
    /// Whether the event loop should stop.
    should_quit: bool,
    /// The member table with search, paging and editing.
    table_view: TableView,
    /// The help overlay.
    help_view: HelpView,
    /// Toasts confirming record operations.
    notifications: NotificationManager,
    /// Spinner shown until the member list arrives.
    loading: LoadingIndicator,
    /// Where the member list is fetched from, shown in the header.
    source_url: String,
}

impl App {
    /// Create the application in the loading state.
    pub fn new(source_url: impl Into<String>) -> Self {
        debug!("Creating new application instance");

        let mut loading = LoadingIndicator::with_message("Loading members...");
        loading.start();

        Self {
            state: AppState::Loading,
            should_quit: false,
            table_view: TableView::new(),
            help_view: HelpView::new(),
            notifications: NotificationManager::new(),
            loading,
            source_url: source_url.into(),
        }
    }

    /// Returns whether the application should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    #[cfg(test)]
    pub fn state(&self) -> AppState {
        self.state
    }

    #[cfg(test)]
    pub fn table_view(&self) -> &TableView {
        &self.table_view
    }

    #[cfg(test)]
    pub fn notifications(&self) -> &NotificationManager {
        &self.notifications
    }

    #[cfg(test)]
    pub fn is_loading(&self) -> bool {
        self.loading.is_active()
    }

    fn quit(&mut self) {
        info!("Quitting");
        self.should_quit = true;
        self.state = AppState::Exiting;
    }

    /// Apply a message from a background task.
    pub fn handle_task_message(&mut self, message: TaskMessage) {
        match message {
            TaskMessage::RecordsLoaded(Ok(rows)) => {
                info!(count = rows.len(), "Member list loaded");
                let count = rows.len();
                self.table_view.set_records(rows);
                self.notifications
                    .success(format!("Loaded {} records", count));
            }
            TaskMessage::RecordsLoaded(Err(e)) => {
                // Load failures stay in the log; the table shows as empty.
                let err = AppError::from(e);
                error!(error = %err, detail = %err.user_message(), "Failed to load member list");
                self.table_view.set_records(Vec::new());
            }
        }

        self.loading.stop();
        if self.state == AppState::Loading {
            self.state = AppState::Table;
        }
    }

    /// Update the application state based on an event.
    ///
    /// This implements the Update part of The Elm Architecture (TEA).
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Key(key_event) => {
                trace!(key = ?key_event.code, modifiers = ?key_event.modifiers, "Key event");
                self.handle_key_event(key_event);
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => {
                self.loading.tick();
                self.notifications.tick();
            }
        }
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        if key_event.code == KeyCode::Char('c') && key_event.modifiers == KeyModifiers::CONTROL {
            self.quit();
            return;
        }

        match self.state {
            AppState::Loading => {
                if key_event.code == KeyCode::Char('q') {
                    self.quit();
                }
            }
            AppState::Table => {
                if !self.table_view.is_capturing_text() {
                    match key_event.code {
                        KeyCode::Char('q') => {
                            self.quit();
                            return;
                        }
                        KeyCode::Char('?') => {
                            self.help_view.reset_scroll();
                            self.state = AppState::Help;
                            return;
                        }
                        _ => {}
                    }
                }

                if let Some(action) = self.table_view.handle_input(key_event) {
                    self.handle_table_action(action);
                }
            }
            AppState::Help => {
                if let Some(HelpAction::Close) = self.help_view.handle_input(key_event) {
                    self.state = AppState::Table;
                }
            }
            AppState::Exiting => {}
        }
    }

    fn handle_table_action(&mut self, action: TableAction) {
        match action {
            TableAction::Saved(label) => {
                info!(record = %label, "Row saved");
                self.notifications.success(format!("Saved {}", label));
            }
            TableAction::Cancelled(label) => {
                debug!(record = %label, "Edit cancelled");
                self.notifications
                    .info(format!("Discarded changes to {}", label));
            }
            TableAction::Deleted(label) => {
                info!(record = %label, "Row deleted");
                self.notifications.warning(format!("Deleted {}", label));
            }
        }
    }

    /// Render the application UI.
    ///
    /// This implements the View part of The Elm Architecture (TEA).
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(1),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        self.render_header(frame, chunks[0]);

        match self.state {
            AppState::Loading => self.loading.render(frame, chunks[1]),
            AppState::Table | AppState::Exiting => self.table_view.render(frame, chunks[1]),
            AppState::Help => {
                self.table_view.render(frame, chunks[1]);
                self.help_view.render(frame, centered_rect(70, 80, chunks[1]));
            }
        }

        self.render_footer(frame, chunks[2]);
        self.notifications.render(frame, area);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let title = Line::from(vec![
            Span::styled("Members", Style::default().fg(Color::Cyan)),
            Span::styled(
                format!("  {}", self.source_url),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        let header = Paragraph::new(title).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(header, area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        match self.state {
            AppState::Table => self.table_view.render_status_bar(frame, area),
            AppState::Loading => render_context_help(frame, area, KeyContext::Loading),
            AppState::Help => render_context_help(frame, area, KeyContext::Help),
            AppState::Exiting => {
                let footer = Paragraph::new(Span::styled(
                    " Exiting... ",
                    Style::default().fg(Color::Black).bg(Color::Cyan),
                ));
                frame.render_widget(footer, area);
            }
        }
    }
}

/// A rectangle centered in `area`, sized as percentages of it.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::table::RecordFields;
    use ratatui::{backend::TestBackend, Terminal};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn member(i: usize) -> RecordFields {
        vec![
            ("id".to_string(), i.to_string()),
            ("name".to_string(), format!("Member {i}")),
        ]
    }

    fn loaded_app(n: usize) -> App {
        let mut app = App::new("http://localhost/members");
        app.handle_task_message(TaskMessage::RecordsLoaded(Ok((0..n).map(member).collect())));
        app
    }

    #[test]
    fn test_app_starts_loading() {
        let app = App::new("http://localhost/members");
        assert_eq!(app.state(), AppState::Loading);
        assert!(app.is_loading());
        assert!(!app.should_quit());
    }

    #[test]
    fn test_records_loaded_shows_table() {
        let app = loaded_app(25);
        assert_eq!(app.state(), AppState::Table);
        assert!(!app.is_loading());
        assert_eq!(app.table_view().table().len(), 25);
        assert_eq!(app.table_view().table().total_pages(), 3);
        let messages: Vec<&str> = app.notifications().iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["Loaded 25 records"]);
    }

    #[test]
    fn test_load_failure_shows_empty_table_without_toast() {
        let mut app = App::new("http://localhost/members");
        app.handle_task_message(TaskMessage::RecordsLoaded(Err(ApiError::ServerError(
            "boom".to_string(),
        ))));
        assert_eq!(app.state(), AppState::Table);
        assert!(app.table_view().table().is_empty());
        assert!(app.notifications().is_empty());
    }

    #[test]
    fn test_quit_on_q() {
        let mut app = loaded_app(1);
        app.update(key(KeyCode::Char('q')));
        assert!(app.should_quit());
        assert_eq!(app.state(), AppState::Exiting);
    }

    #[test]
    fn test_quit_while_loading() {
        let mut app = App::new("http://localhost/members");
        app.update(key(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[test]
    fn test_ctrl_c_quits_while_editing() {
        let mut app = loaded_app(1);
        app.update(key(KeyCode::Char('e')));
        app.update(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(app.should_quit());
    }

    #[test]
    fn test_q_types_into_search() {
        let mut app = loaded_app(3);
        app.update(key(KeyCode::Char('/')));
        app.update(key(KeyCode::Char('q')));
        assert!(!app.should_quit());
        assert_eq!(app.table_view().search_query(), "q");
    }

    #[test]
    fn test_help_opens_and_closes() {
        let mut app = loaded_app(1);
        app.update(key(KeyCode::Char('?')));
        assert_eq!(app.state(), AppState::Help);
        app.update(key(KeyCode::Esc));
        assert_eq!(app.state(), AppState::Table);
    }

    #[test]
    fn test_save_and_delete_notify() {
        let mut app = loaded_app(2);
        app.update(key(KeyCode::Char('e')));
        app.update(key(KeyCode::Enter));
        app.update(key(KeyCode::Char('d')));

        let messages: Vec<&str> = app.notifications().iter().map(|n| n.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["Loaded 2 records", "Saved Member 0", "Deleted Member 0"]
        );
        assert_eq!(app.table_view().table().len(), 1);
    }

    #[test]
    fn test_tick_expires_nothing_fresh() {
        let mut app = loaded_app(0);
        app.update(Event::Tick);
        assert_eq!(app.notifications().len(), 1);
        assert!(!app.should_quit());
    }

    #[test]
    fn test_view_renders_each_state() {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let mut app = App::new("http://localhost/members");
        terminal.draw(|f| app.view(f)).unwrap();

        app.handle_task_message(TaskMessage::RecordsLoaded(Ok((0..12).map(member).collect())));
        terminal.draw(|f| app.view(f)).unwrap();

        app.update(key(KeyCode::Char('?')));
        terminal.draw(|f| app.view(f)).unwrap();
    }

    #[test]
    fn test_centered_rect_is_inside() {
        let area = Rect::new(0, 0, 100, 40);
        let inner = centered_rect(70, 80, area);
        assert_eq!(inner.width, 70);
        assert_eq!(inner.height, 32);
        assert!(inner.x > 0 && inner.y > 0);
    }
}
