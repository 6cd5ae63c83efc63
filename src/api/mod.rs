//! Member list client and wire types.
//!
//! This module fetches the record collection from the remote JSON source.

mod client;
pub mod error;
pub mod types;

pub use client::MembersClient;
pub use error::ApiError;
