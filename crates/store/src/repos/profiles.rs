//! Profile repository trait.

use crate::error::StoreResult;
use crate::models::ProfileRow;
use async_trait::async_trait;

/// Repository for profile visit records.
#[async_trait]
pub trait ProfileRepo: Send + Sync {
    /// Get a profile by username. Returns `None` when no row matches.
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<ProfileRow>>;

    /// Insert a fresh profile (`visits = 1`, active) unless one already exists.
    /// Returns true if this call created the row.
    async fn create_if_absent(&self, username: &str) -> StoreResult<bool>;

    /// Atomically mark the profile active and add one visit, returning the new count.
    /// Fails with `NotFound` if no row matches.
    async fn increment_visits(&self, username: &str) -> StoreResult<i64>;

    /// Mark the profile inactive, leaving the counter untouched.
    /// Missing rows are not an error; returns whether a row matched.
    async fn mark_inactive(&self, username: &str) -> StoreResult<bool>;
}
