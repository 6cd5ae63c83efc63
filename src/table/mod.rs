//! Member record table state.
//!
//! This module holds the records and everything the admin table derives from
//! them: search filtering, pagination, selection, edit drafts and deletion.
//! It has no knowledge of the terminal.

pub mod pipeline;
mod record;
mod state;

pub use record::{RecordFields, RecordId};
pub use state::RecordTable;
