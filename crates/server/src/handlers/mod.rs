//! HTTP request handlers.

pub mod documents;
pub mod health;
pub mod profiles;

pub use documents::*;
pub use health::*;
pub use profiles::*;
