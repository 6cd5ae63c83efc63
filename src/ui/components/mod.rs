//! Reusable UI components.

mod help_bar;
mod input;
mod loading;
mod notification;
mod pagination;
mod search_bar;

pub use help_bar::render_context_help;
pub use input::TextInput;
pub use loading::LoadingIndicator;
pub use notification::NotificationManager;
pub use pagination::render_pagination;
pub use search_bar::{highlight_text, SearchAction, SearchBar};
