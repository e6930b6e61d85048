//! Visit tracking on top of a [`ProfileStore`].
//!
//! The tracker turns raw store operations into the two request-level entry
//! points: record a visit (creating the profile on first sight) and
//! deactivate a profile.

use crate::error::StoreResult;
use crate::models::ProfileRow;
use crate::store::ProfileStore;
use std::sync::Arc;

/// Result of recording a visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitOutcome {
    /// The profile did not exist and was created with one visit.
    Created,
    /// The profile existed; `visits` is the count after this visit.
    Incremented { visits: i64 },
}

impl VisitOutcome {
    /// Visit count after the visit was recorded.
    pub fn visits(self) -> i64 {
        match self {
            Self::Created => 1,
            Self::Incremented { visits } => visits,
        }
    }

    pub fn is_created(self) -> bool {
        matches!(self, Self::Created)
    }
}

/// Records profile visits and deactivations.
#[derive(Clone)]
pub struct VisitTracker {
    store: Arc<dyn ProfileStore>,
}

impl VisitTracker {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<dyn ProfileStore> {
        &self.store
    }

    /// Look up a profile for display.
    pub async fn find_by_username(&self, username: &str) -> StoreResult<Option<ProfileRow>> {
        self.store.find_by_username(username).await
    }

    /// Record a visit, creating the profile if it does not exist yet.
    ///
    /// Creation is an insert-if-absent guarded by the primary key, so two
    /// concurrent first visits cannot both create the row: the loser falls
    /// through to the atomic increment.
    pub async fn increment_or_create_visit(&self, username: &str) -> StoreResult<VisitOutcome> {
        if self.store.create_if_absent(username).await? {
            tracing::debug!(username = %username, "Profile created on first visit");
            return Ok(VisitOutcome::Created);
        }

        let visits = self.store.increment_visits(username).await?;
        tracing::debug!(username = %username, visits, "Profile visit recorded");
        Ok(VisitOutcome::Incremented { visits })
    }

    /// Mark a profile inactive. Unknown usernames are ignored.
    ///
    /// Returns whether a profile was found.
    pub async fn mark_inactive(&self, username: &str) -> StoreResult<bool> {
        let found = self.store.mark_inactive(username).await?;
        if found {
            tracing::debug!(username = %username, "Profile marked inactive");
        } else {
            tracing::debug!(username = %username, "Deactivation ignored for unknown profile");
        }
        Ok(found)
    }
}
