//! Profile store abstraction and implementations for OPN.
//!
//! This crate owns the persisted profile rows (username, active flag, visit
//! count) and the visit-tracking logic built on them:
//! - [`ProfileRepo`]: lookup, insert-if-absent, atomic increment, deactivation
//! - [`SqliteStore`] and [`PostgresStore`] backends
//! - [`VisitTracker`]: find-or-create visit recording

pub mod error;
pub mod models;
pub mod postgres;
pub mod repos;
pub mod store;
pub mod tracker;

pub use error::{StoreError, StoreResult};
pub use models::ProfileRow;
pub use postgres::{PgParams, PgPoolSettings, PostgresStore};
pub use repos::ProfileRepo;
pub use store::{ProfileStore, SqliteStore};
pub use tracker::{VisitOutcome, VisitTracker};

use opn_core::config::StoreConfig;
use std::sync::Arc;
use std::time::Duration;

/// Open a profile store from configuration. The returned store is migrated.
pub async fn from_config(config: &StoreConfig) -> StoreResult<Arc<dyn ProfileStore>> {
    config.validate().map_err(StoreError::Config)?;

    match config {
        StoreConfig::Sqlite {
            path,
            busy_timeout_secs,
        } => {
            tracing::info!(path = %path.display(), "Opening SQLite profile store");
            let store = SqliteStore::new(path, Duration::from_secs(*busy_timeout_secs)).await?;
            Ok(Arc::new(store) as Arc<dyn ProfileStore>)
        }
        StoreConfig::Postgres {
            url,
            host,
            port,
            username,
            password,
            database,
            ssl_mode,
            max_connections,
            statement_timeout_ms,
        } => {
            let settings = PgPoolSettings {
                max_connections: *max_connections,
                statement_timeout_ms: *statement_timeout_ms,
            };
            let store = if let Some(url) = url {
                // URL takes precedence over individual fields
                tracing::info!("Connecting to PostgreSQL using connection URL");
                PostgresStore::from_url(url, settings).await?
            } else if let (Some(host), Some(database)) = (host.as_deref(), database.as_deref()) {
                let params = PgParams {
                    host,
                    port: port.unwrap_or(5432),
                    username: username.as_deref(),
                    password: password.as_deref(),
                    database,
                    ssl_mode: *ssl_mode,
                };
                PostgresStore::from_params(params, settings).await?
            } else {
                return Err(StoreError::Config(
                    "postgres config requires either 'url' or 'host' + 'database'".to_string(),
                ));
            };
            Ok(Arc::new(store) as Arc<dyn ProfileStore>)
        }
    }
}
