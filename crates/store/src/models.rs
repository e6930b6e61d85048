//! Database models mapping to the profile schema.

use sqlx::FromRow;
use time::OffsetDateTime;

/// Persisted profile record.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ProfileRow {
    /// Unique key, immutable once created.
    pub username: String,
    /// Set on every tracked visit, cleared by deactivation.
    pub is_active: bool,
    /// Starts at 1 on creation; only ever incremented.
    pub visits: i64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}
