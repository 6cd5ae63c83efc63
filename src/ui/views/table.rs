//! The member table view.
//!
//! Wraps [`RecordTable`] with a row cursor, the search box and the inline
//! cell editor, and maps key presses onto the table's handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use tracing::debug;

use crate::events::KeyContext;
use crate::table::{RecordFields, RecordId, RecordTable};
use crate::ui::components::{
    highlight_text, render_context_help, render_pagination, SearchAction, SearchBar, TextInput,
};

/// Actions the app reacts to after a key press in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableAction {
    /// A row's draft was saved; carries the record label.
    Saved(String),
    /// A row's draft was discarded.
    Cancelled(String),
    /// A row was deleted.
    Deleted(String),
}

/// The cell being edited.
#[derive(Debug, Clone)]
struct CellEditor {
    id: RecordId,
    /// Index into the draft's fields.
    field: usize,
    input: TextInput,
}

/// The member table view.
#[derive(Debug)]
pub struct TableView {
    /// Records with their search, page, selection and draft state.
    table: RecordTable,
    /// Cursor row within the current page.
    cursor: usize,
    /// Search line above the table.
    search: SearchBar,
    /// Open cell editor, if a row is being edited.
    editor: Option<CellEditor>,
}

impl Default for TableView {
    fn default() -> Self {
        Self::new()
    }
}

impl TableView {
    /// Create an empty table view with the cursor on the first row.
    pub fn new() -> Self {
        Self {
            table: RecordTable::new(),
            cursor: 0,
            search: SearchBar::new(),
            editor: None,
        }
    }

    /// Replace the records shown.
    pub fn set_records(&mut self, rows: Vec<RecordFields>) {
        self.table.load(rows);
        self.editor = None;
        self.cursor = 0;
    }

    #[cfg(test)]
    pub fn table(&self) -> &RecordTable {
        &self.table
    }

    #[cfg(test)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Name of the field focused in the cell editor.
    #[cfg(test)]
    pub fn editing_field(&self) -> Option<&str> {
        let editor = self.editor.as_ref()?;
        self.table
            .draft(editor.id)
            .and_then(|d| d.fields().get(editor.field))
            .map(|(k, _)| k.as_str())
    }

    #[cfg(test)]
    pub fn search_query(&self) -> &str {
        self.search.query()
    }

    /// Whether keys are going to a text input rather than shortcuts.
    pub fn is_capturing_text(&self) -> bool {
        self.search.is_active() || self.editor.is_some()
    }

    /// Key context for the status bar hints.
    pub fn key_context(&self) -> KeyContext {
        if self.editor.is_some() {
            KeyContext::Edit
        } else if self.search.is_active() {
            KeyContext::Search
        } else {
            KeyContext::Table
        }
    }

    fn clamp_cursor(&mut self) {
        let len = self.table.view().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Handle a key press.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<TableAction> {
        if self.editor.is_some() {
            return self.handle_edit_input(key);
        }

        if self.search.is_active() {
            match self.search.handle_input(key) {
                Some(SearchAction::Changed) | Some(SearchAction::Cleared) => {
                    let query = self.search.query().to_string();
                    self.table.set_search_term(query);
                    self.clamp_cursor();
                }
                Some(SearchAction::Accepted) | None => {}
            }
            return None;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                self.cursor += 1;
                self.clamp_cursor();
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            (KeyCode::Char('g'), KeyModifiers::NONE) => self.cursor = 0,
            (KeyCode::Char('G'), _) => {
                self.cursor = self.table.view().len().saturating_sub(1);
            }
            (KeyCode::Char('l') | KeyCode::Char('n'), KeyModifiers::NONE) | (KeyCode::Right, _) => {
                self.table.next_page();
                self.clamp_cursor();
            }
            (KeyCode::Char('h') | KeyCode::Char('p'), KeyModifiers::NONE) | (KeyCode::Left, _) => {
                self.table.prev_page();
                self.clamp_cursor();
            }
            (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) => {
                if let Some(page) = c.to_digit(10) {
                    self.table.set_page(page as usize);
                    self.cursor = 0;
                }
            }
            (KeyCode::Char('/'), KeyModifiers::NONE) => self.search.activate(),
            (KeyCode::Char(' '), _) => {
                self.table.toggle_selection(self.cursor);
            }
            (KeyCode::Char('a'), KeyModifiers::NONE) => {
                self.table.toggle_select_visible();
            }
            (KeyCode::Char('e'), KeyModifiers::NONE) => self.start_editing(),
            (KeyCode::Char('d'), KeyModifiers::NONE) | (KeyCode::Delete, _) => {
                let removed = self.table.delete_row(self.cursor)?;
                self.clamp_cursor();
                return Some(TableAction::Deleted(removed.label()));
            }
            _ => {}
        }
        None
    }

    fn start_editing(&mut self) {
        let Some(id) = self.table.begin_edit(self.cursor) else {
            return;
        };
        let value = self
            .table
            .draft(id)
            .and_then(|d| d.fields().first())
            .map(|(_, v)| v.clone())
            .unwrap_or_default();
        debug!(record = %id, "Opening cell editor");
        self.editor = Some(CellEditor {
            id,
            field: 0,
            input: TextInput::with_value(value),
        });
    }

    fn handle_edit_input(&mut self, key: KeyEvent) -> Option<TableAction> {
        let id = self.editor.as_ref()?.id;
        if !self.table.is_editing(id) {
            debug!(record = %id, "Draft gone, closing cell editor");
            self.editor = None;
            return None;
        }
        let field_count = self.table.draft(id).map_or(0, |d| d.fields().len());
        let editor = self.editor.as_mut()?;

        match key.code {
            KeyCode::Enter => {
                self.editor = None;
                // The cursor cannot move while the editor is open.
                let saved = if self.table.visible_id(self.cursor) == Some(id) {
                    self.table.save_edit(self.cursor).is_some()
                } else {
                    self.table.commit(id)
                };
                self.clamp_cursor();
                saved.then(|| TableAction::Saved(self.label(id)))
            }
            KeyCode::Esc => {
                self.editor = None;
                self.table
                    .cancel_edit(id)
                    .then(|| TableAction::Cancelled(self.label(id)))
            }
            KeyCode::Tab | KeyCode::BackTab if field_count > 0 => {
                editor.field = if key.code == KeyCode::Tab {
                    (editor.field + 1) % field_count
                } else {
                    (editor.field + field_count - 1) % field_count
                };
                let value = self
                    .table
                    .draft(id)
                    .and_then(|d| d.fields().get(editor.field))
                    .map(|(_, v)| v.clone())
                    .unwrap_or_default();
                editor.input.set_value(value);
                None
            }
            _ => {
                if editor.input.handle_input(key) {
                    let field_key = self
                        .table
                        .draft(id)
                        .and_then(|d| d.fields().get(editor.field))
                        .map(|(k, _)| k.clone());
                    if let Some(field_key) = field_key {
                        let value = editor.input.value().to_string();
                        self.table.edit_field(id, &field_key, value);
                    }
                }
                None
            }
        }
    }

    fn label(&self, id: RecordId) -> String {
        self.table
            .records()
            .get_by_id(id)
            .map(|r| r.label())
            .unwrap_or_else(|| id.to_string())
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Render search line, table and pagination into `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        let view = self.table.view();
        self.search.render(frame, chunks[0], view.filtered_count);
        self.render_table(frame, chunks[1]);
        render_pagination(frame, chunks[2], view.page_numbers(), view.page);
    }

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" Members ({}) ", self.table.len()));

        if self.table.is_empty() {
            let empty = Paragraph::new("No records")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let columns = self.table.columns();
        let header_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let header_box = if self.table.all_visible_selected() {
            "[x]"
        } else {
            "[ ]"
        };

        let header = Row::new(
            std::iter::once(Cell::from(header_box))
                .chain(columns.iter().map(|c| Cell::from(c.to_string())))
                .chain(std::iter::once(Cell::from("Action"))),
        )
        .style(header_style);

        let query = self.table.search_term();
        let view = self.table.view();
        let rows = view.rows.iter().enumerate().filter_map(|(i, visible)| {
            let record = self.table.records().get(visible.absolute_index)?;
            let id = visible.id;
            let draft = self.table.draft(id);
            let editor = self.editor.as_ref().filter(|e| e.id == id);
            let focused_key = editor
                .and_then(|e| draft.and_then(|d| d.fields().get(e.field)))
                .map(|(k, _)| k.as_str());

            let checkbox = if self.table.is_selected_at(visible.absolute_index) {
                "[x]"
            } else {
                "[ ]"
            };

            let mut cells = vec![Cell::from(checkbox)];
            for key in &columns {
                let cell = match (draft, editor) {
                    (Some(_), Some(e)) if focused_key == Some(*key) => Cell::from(Line::from(
                        Span::styled(
                            format!("{}▏", e.input.value()),
                            Style::default()
                                .fg(Color::Black)
                                .bg(Color::Yellow),
                        ),
                    )),
                    (Some(d), _) => Cell::from(Line::from(Span::styled(
                        d.get(key).unwrap_or_default().to_string(),
                        Style::default().add_modifier(Modifier::UNDERLINED),
                    ))),
                    (None, _) => Cell::from(highlight_text(
                        record.get(key).unwrap_or_default(),
                        query,
                        Style::default(),
                    )),
                };
                cells.push(cell);
            }

            let action = if self.table.is_editing_at(visible.absolute_index) {
                Span::styled("Save", Style::default().fg(Color::Green))
            } else {
                Span::styled("Edit Delete", Style::default().fg(Color::DarkGray))
            };
            cells.push(Cell::from(Line::from(action)));

            let mut row = Row::new(cells);
            if i == self.cursor {
                row = row.style(Style::default().bg(Color::DarkGray));
            }
            Some(row)
        });

        let widths = std::iter::once(Constraint::Length(3))
            .chain(columns.iter().map(|_| Constraint::Fill(1)))
            .chain(std::iter::once(Constraint::Length(11)));

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .column_spacing(1);

        frame.render_widget(table, area);
    }

    /// Render the status bar: counts on the left, key hints on the right.
    pub fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(30), Constraint::Fill(1)])
            .split(area);

        let mode = match self.key_context() {
            KeyContext::Edit => "EDIT",
            KeyContext::Search => "SEARCH",
            _ => "TABLE",
        };
        let status = Line::from(vec![
            Span::styled(
                format!(" {} ", mode),
                Style::default().fg(Color::Black).bg(Color::Cyan),
            ),
            Span::raw(self.status_text()),
        ]);

        frame.render_widget(Paragraph::new(status), chunks[0]);
        render_context_help(frame, chunks[1], self.key_context());
    }

    /// Page position and record counts for the status bar.
    fn status_text(&self) -> String {
        let view = self.table.view();
        let mut text = format!(
            " page {}/{}  {} shown  {} selected",
            view.page,
            view.total_pages.max(1),
            view.filtered_count,
            self.table.selected_count()
        );
        let editing = self.table.editing_count();
        if editing > 0 {
            text.push_str(&format!("  {} editing", editing));
        }
        text
    }
}
