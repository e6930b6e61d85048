//! Application state shared across handlers.

use opn_core::config::AppConfig;
use opn_store::{ProfileStore, VisitTracker};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Visit tracker over the injected profile store.
    pub tracker: VisitTracker,
}

impl AppState {
    /// Create a new application state around an opened store.
    pub fn new(config: AppConfig, store: Arc<dyn ProfileStore>) -> Self {
        Self {
            config: Arc::new(config),
            tracker: VisitTracker::new(store),
        }
    }

    /// The profile store backing the tracker.
    pub fn store(&self) -> &Arc<dyn ProfileStore> {
        self.tracker.store()
    }
}
