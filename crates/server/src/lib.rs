//! HTTP service for OPN profile pages.
//!
//! Exposes visit tracking and profile document validation as JSON endpoints.

pub mod error;
pub mod handlers;
pub mod metrics;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
