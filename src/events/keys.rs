//! Key contexts and their footer hints.

/// Which part of the UI currently receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    /// Waiting for the member list.
    Loading,
    /// Navigating the table.
    Table,
    /// Typing into the search input.
    Search,
    /// Editing a row's fields.
    Edit,
    /// Help screen.
    Help,
}

/// Short key hints for the status bar, keys in brackets.
pub fn get_context_hints(context: KeyContext) -> &'static str {
    match context {
        KeyContext::Loading => "[q] quit",
        KeyContext::Table => {
            "[j/k] row  [h/l] page  [/] search  [space] select  [a] all  [e] edit  [d] delete  [?] help"
        }
        KeyContext::Search => "[Enter] keep  [Esc] clear",
        KeyContext::Edit => "[Tab] next field  [Enter] save  [Esc] cancel",
        KeyContext::Help => "[Esc/q] close",
    }
}
