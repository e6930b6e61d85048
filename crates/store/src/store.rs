//! Profile store trait and the SQLite implementation.

use crate::error::{StoreError, StoreResult};
use crate::models::ProfileRow;
use crate::repos::ProfileRepo;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use time::OffsetDateTime;

/// Combined profile store trait.
#[async_trait]
pub trait ProfileStore: ProfileRepo + Send + Sync {
    /// Run database migrations.
    async fn migrate(&self) -> StoreResult<()>;

    /// Check database connectivity and health.
    async fn health_check(&self) -> StoreResult<()>;

    /// Close the connection pool, waiting for checked-out connections to be returned.
    async fn close(&self);
}

/// SQLite-based profile store.
pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

impl SqliteStore {
    /// Open (creating if needed) an SQLite store at `path` and migrate it.
    pub async fn new(path: impl AsRef<Path>, busy_timeout: Duration) -> StoreResult<Self> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}?mode=rwc", path.display()))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .busy_timeout(busy_timeout);

        let pool = SqlitePoolOptions::new()
            // SQLite serializes writers; a single connection avoids "database is locked"
            // under concurrent request handlers.
            .max_connections(1)
            .connect_with(opts)
            .await?;

        let store = Self { pool };
        store.migrate().await?;

        tracing::debug!(path = %path.display(), "SQLite profile store opened");

        Ok(store)
    }

    /// Open an in-memory store. Data lives as long as the store.
    pub async fn in_memory() -> StoreResult<Self> {
        Self::new(":memory:", Duration::from_secs(5)).await
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}

#[async_trait]
impl ProfileStore for SqliteStore {
    async fn migrate(&self) -> StoreResult<()> {
        let table_exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='profiles')",
        )
        .fetch_one(&self.pool)
        .await?;

        if table_exists {
            let columns: Vec<(i32, String, String, i32, Option<String>, i32)> =
                sqlx::query_as("PRAGMA table_info(profiles)")
                    .fetch_all(&self.pool)
                    .await?;

            let column_names: std::collections::HashSet<&str> = columns
                .iter()
                .map(|(_, name, _, _, _, _)| name.as_str())
                .collect();

            let required_columns = ["username", "is_active", "visits"];
            let missing: Vec<&str> = required_columns
                .iter()
                .filter(|col| !column_names.contains(*col))
                .copied()
                .collect();

            if !missing.is_empty() {
                return Err(StoreError::Internal(format!(
                    "Incompatible database schema detected: profiles table is missing columns: {}. \
                     Delete the database file and restart to create a fresh schema.",
                    missing.join(", ")
                )));
            }
        }

        sqlx::query(SCHEMA_SQL).execute(&self.pool).await?;

        Ok(())
    }

    async fn health_check(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ProfileRepo for SqliteStore {
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<ProfileRow>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            "SELECT username, is_active, visits, created_at, updated_at FROM profiles WHERE username = ? LIMIT 1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn create_if_absent(&self, username: &str) -> StoreResult<bool> {
        let now = OffsetDateTime::now_utc();
        // ON CONFLICT DO NOTHING returns no row, so an absent result means the profile existed.
        let row: Option<(i64,)> = sqlx::query_as(
            r#"
            INSERT INTO profiles (username, is_active, visits, created_at, updated_at)
            VALUES (?, ?, 1, ?, ?)
            ON CONFLICT(username) DO NOTHING
            RETURNING visits
            "#,
        )
        .bind(username)
        .bind(true)
        .bind(now)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.is_some())
    }

    async fn increment_visits(&self, username: &str) -> StoreResult<i64> {
        let visits: Option<i64> = sqlx::query_scalar(
            "UPDATE profiles SET is_active = ?, visits = visits + 1, updated_at = ? WHERE username = ? RETURNING visits",
        )
        .bind(true)
        .bind(OffsetDateTime::now_utc())
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        visits.ok_or_else(|| StoreError::NotFound(format!("profile '{username}' not found")))
    }

    async fn mark_inactive(&self, username: &str) -> StoreResult<bool> {
        let result =
            sqlx::query("UPDATE profiles SET is_active = ?, updated_at = ? WHERE username = ?")
                .bind(false)
                .bind(OffsetDateTime::now_utc())
                .bind(username)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS profiles (
    username TEXT PRIMARY KEY NOT NULL,
    is_active INTEGER NOT NULL DEFAULT 1,
    visits INTEGER NOT NULL DEFAULT 1 CHECK (visits >= 0),
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_profiles_active ON profiles(is_active);
"#;
