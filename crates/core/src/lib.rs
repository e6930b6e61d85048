//! Core domain types and shared logic for OPN profile pages.
//!
//! This crate defines the data model used across the other crates:
//! - Profile usernames
//! - Profile documents and their field-level validation
//! - Display helpers
//! - Configuration

pub mod config;
pub mod error;
pub mod number;
pub mod profile;
pub mod username;

pub use error::{Error, Result};
pub use number::pad_number;
pub use profile::{ProfileDocument, ValidationIssue};
pub use username::Username;

/// Width used when displaying visit counters.
pub const VISITS_DISPLAY_WIDTH: usize = 4;
