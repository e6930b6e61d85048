//! PostgreSQL-based profile store implementation.

use crate::error::{StoreError, StoreResult};
use crate::models::ProfileRow;
use crate::repos::ProfileRepo;
use crate::store::ProfileStore;
use async_trait::async_trait;
use opn_core::config::PgSslMode;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode as SqlxPgSslMode};
use sqlx::{Pool, Postgres};
use std::str::FromStr;
use time::OffsetDateTime;

const POSTGRES_SCHEMA: &str = include_str!("postgres_schema.sql");

/// Statements of a schema script, with `--` comment lines removed.
///
/// Postgres rejects multi-statement prepared queries, so the script runs one
/// statement at a time.
fn schema_statements(schema: &str) -> Vec<String> {
    let uncommented = schema
        .lines()
        .filter(|line| !line.trim_start().starts_with("--"))
        .collect::<Vec<_>>()
        .join("\n");

    uncommented
        .split(';')
        .map(str::trim)
        .filter(|statement| !statement.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Pool settings applied however the server address is given.
#[derive(Debug, Clone, Copy)]
pub struct PgPoolSettings {
    pub max_connections: u32,
    /// Server-side `statement_timeout`; `None` keeps the server default.
    pub statement_timeout_ms: Option<u64>,
}

/// Field-by-field connection target, for deployments that keep the password
/// out of the URL.
#[derive(Clone, Copy)]
pub struct PgParams<'a> {
    pub host: &'a str,
    pub port: u16,
    pub username: Option<&'a str>,
    pub password: Option<&'a str>,
    pub database: &'a str,
    pub ssl_mode: Option<PgSslMode>,
}

impl PgParams<'_> {
    fn connect_options(&self) -> PgConnectOptions {
        let mut opts = PgConnectOptions::new()
            .host(self.host)
            .port(self.port)
            .database(self.database);
        if let Some(username) = self.username {
            opts = opts.username(username);
        }
        if let Some(password) = self.password {
            opts = opts.password(password);
        }
        if let Some(mode) = self.ssl_mode {
            opts = opts.ssl_mode(match mode {
                PgSslMode::Disable => SqlxPgSslMode::Disable,
                PgSslMode::Prefer => SqlxPgSslMode::Prefer,
                PgSslMode::Require => SqlxPgSslMode::Require,
            });
        }
        opts
    }
}

/// PostgreSQL-based profile store.
pub struct PostgresStore {
    pool: Pool<Postgres>,
}

impl PostgresStore {
    /// Open a store from a `postgres://` connection URL.
    pub async fn from_url(url: &str, settings: PgPoolSettings) -> StoreResult<Self> {
        Self::open(PgConnectOptions::from_str(url)?, settings).await
    }

    /// Open a store from individual connection parameters.
    pub async fn from_params(params: PgParams<'_>, settings: PgPoolSettings) -> StoreResult<Self> {
        tracing::info!(
            host = params.host,
            port = params.port,
            database = params.database,
            username = params.username.unwrap_or("<none>"),
            ssl_mode = ?params.ssl_mode,
            "Connecting to PostgreSQL"
        );
        Self::open(params.connect_options(), settings).await
    }

    async fn open(opts: PgConnectOptions, settings: PgPoolSettings) -> StoreResult<Self> {
        let opts = match settings.statement_timeout_ms {
            Some(ms) => opts.options([("statement_timeout", format!("{ms}ms"))]),
            None => opts,
        };

        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .connect_with(opts)
            .await?;

        let store = Self { pool };
        store.migrate().await?;
        tracing::debug!(?settings, "PostgreSQL profile store opened");

        Ok(store)
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &Pool<Postgres> {
        &self.pool
    }
}

#[async_trait]
impl ProfileStore for PostgresStore {
    async fn migrate(&self) -> StoreResult<()> {
        for statement in schema_statements(POSTGRES_SCHEMA) {
            sqlx::query(&statement).execute(&self.pool).await?;
        }

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
impl ProfileRepo for PostgresStore {
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<ProfileRow>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            "SELECT username, is_active, visits, created_at, updated_at FROM profiles WHERE username = $1 LIMIT 1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn create_if_absent(&self, username: &str) -> StoreResult<bool> {
        let now = OffsetDateTime::now_utc();
        let row: Option<(i64,)> = sqlx::query_as(
            r#"
            INSERT INTO profiles (username, is_active, visits, created_at, updated_at)
            VALUES ($1, TRUE, 1, $2, $2)
            ON CONFLICT (username) DO NOTHING
            RETURNING visits
            "#,
        )
        .bind(username)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.is_some())
    }

    async fn increment_visits(&self, username: &str) -> StoreResult<i64> {
        let visits: Option<i64> = sqlx::query_scalar(
            "UPDATE profiles SET is_active = TRUE, visits = visits + 1, updated_at = $2 WHERE username = $1 RETURNING visits",
        )
        .bind(username)
        .bind(OffsetDateTime::now_utc())
        .fetch_optional(&self.pool)
        .await?;

        visits.ok_or_else(|| StoreError::NotFound(format!("profile '{username}' not found")))
    }

    async fn mark_inactive(&self, username: &str) -> StoreResult<bool> {
        let result = sqlx::query(
            "UPDATE profiles SET is_active = FALSE, updated_at = $2 WHERE username = $1",
        )
        .bind(username)
        .bind(OffsetDateTime::now_utc())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
