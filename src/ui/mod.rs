//! User interface components and views.
//!
//! This module contains all TUI rendering logic: the table and help views
//! plus the reusable components they are built from.

mod components;
mod views;

pub use components::{render_context_help, LoadingIndicator, NotificationManager};
pub use views::{HelpAction, HelpView, TableAction, TableView};
