//! Configuration types shared across crates.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Enable the /metrics endpoint for Prometheus scraping (default: true).
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_metrics_enabled() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            metrics_enabled: default_metrics_enabled(),
        }
    }
}

/// PostgreSQL SSL mode configuration.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PgSslMode {
    /// Disable SSL/TLS entirely.
    Disable,
    /// Prefer SSL/TLS but allow unencrypted connections (default).
    #[default]
    Prefer,
    /// Require SSL/TLS for all connections.
    Require,
}

/// Profile store configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreConfig {
    /// SQLite database (single-node deployments and tests).
    Sqlite {
        /// Database file path.
        path: PathBuf,
        /// How long a writer waits on a locked database before failing.
        #[serde(default = "default_sqlite_busy_timeout_secs")]
        busy_timeout_secs: u64,
    },
    /// PostgreSQL database.
    Postgres {
        /// Connection URL (optional if using individual fields).
        /// Takes precedence over individual fields if both are provided.
        url: Option<String>,
        /// Database host (e.g., "localhost" or "db.example.com").
        host: Option<String>,
        /// Database port (default: 5432).
        #[serde(default = "default_pg_port")]
        port: Option<u16>,
        /// Database username.
        username: Option<String>,
        /// Database password.
        /// WARNING: Prefer OPN_STORE__PASSWORD env var over storing in config.
        password: Option<String>,
        /// Database name.
        database: Option<String>,
        /// SSL mode for connections.
        ssl_mode: Option<PgSslMode>,
        /// Maximum connections in the pool.
        #[serde(default = "default_max_connections")]
        max_connections: u32,
        /// Statement timeout in milliseconds; PostgreSQL cancels longer queries.
        #[serde(default = "default_statement_timeout_ms")]
        statement_timeout_ms: Option<u64>,
    },
}

fn default_sqlite_busy_timeout_secs() -> u64 {
    5
}

fn default_max_connections() -> u32 {
    10
}

fn default_pg_port() -> Option<u16> {
    Some(5432)
}

fn default_statement_timeout_ms() -> Option<u64> {
    Some(30_000)
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::Sqlite {
            path: PathBuf::from("./data/profiles.db"),
            busy_timeout_secs: default_sqlite_busy_timeout_secs(),
        }
    }
}

impl StoreConfig {
    /// Build an SQLite configuration for the given path with default options.
    pub fn sqlite(path: impl Into<PathBuf>) -> Self {
        Self::Sqlite {
            path: path.into(),
            busy_timeout_secs: default_sqlite_busy_timeout_secs(),
        }
    }

    /// Validate store configuration invariants.
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            StoreConfig::Sqlite { .. } => Ok(()),
            StoreConfig::Postgres {
                url,
                host,
                database,
                max_connections,
                ..
            } => {
                if *max_connections == 0 {
                    return Err("postgres 'max_connections' must be at least 1".to_string());
                }
                match (url.as_ref(), host.as_ref(), database.as_ref()) {
                    (Some(_), _, _) => Ok(()),
                    (None, Some(_), Some(_)) => Ok(()),
                    (None, None, _) => Err(
                        "postgres config requires either 'url' or 'host' + 'database'".to_string(),
                    ),
                    (None, Some(_), None) => Err(
                        "postgres config requires 'database' when using individual fields"
                            .to_string(),
                    ),
                }
            }
        }
    }
}

/// Complete application configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Profile store configuration.
    #[serde(default)]
    pub store: StoreConfig,
}

impl AppConfig {
    /// Validate the whole configuration.
    pub fn validate(&self) -> Result<(), String> {
        self.store.validate()
    }

    /// Create a test configuration backed by an SQLite file at `path`.
    ///
    /// **For testing only.**
    pub fn for_testing(path: impl Into<PathBuf>) -> Self {
        Self {
            server: ServerConfig::default(),
            store: StoreConfig::sqlite(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind, "127.0.0.1:8080");
        assert!(config.metrics_enabled);
    }

    #[test]
    fn test_app_config_deserialize_empty() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert!(config.server.metrics_enabled);
        match config.store {
            StoreConfig::Sqlite {
                path,
                busy_timeout_secs,
            } => {
                assert_eq!(path, PathBuf::from("./data/profiles.db"));
                assert_eq!(busy_timeout_secs, 5);
            }
            other => panic!("expected sqlite default, got {other:?}"),
        }
    }

    #[test]
    fn test_store_config_postgres_defaults() {
        let json = r#"{"type": "postgres", "url": "postgres://localhost/opn"}"#;
        let config: StoreConfig = serde_json::from_str(json).unwrap();
        match &config {
            StoreConfig::Postgres {
                port,
                max_connections,
                statement_timeout_ms,
                ssl_mode,
                ..
            } => {
                assert_eq!(*port, Some(5432));
                assert_eq!(*max_connections, 10);
                assert_eq!(*statement_timeout_ms, Some(30_000));
                assert_eq!(*ssl_mode, None);
            }
            other => panic!("expected postgres, got {other:?}"),
        }
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_store_config_postgres_validate() {
        let host_only: StoreConfig =
            serde_json::from_str(r#"{"type": "postgres", "host": "db"}"#).unwrap();
        assert!(host_only.validate().unwrap_err().contains("'database'"));

        let nothing: StoreConfig = serde_json::from_str(r#"{"type": "postgres"}"#).unwrap();
        assert!(nothing.validate().is_err());

        let params: StoreConfig = serde_json::from_str(
            r#"{"type": "postgres", "host": "db", "database": "opn", "ssl_mode": "require"}"#,
        )
        .unwrap();
        assert!(params.validate().is_ok());

        let no_pool: StoreConfig = serde_json::from_str(
            r#"{"type": "postgres", "url": "postgres://db/opn", "max_connections": 0}"#,
        )
        .unwrap();
        assert!(no_pool.validate().is_err());
    }

    #[test]
    fn test_store_config_sqlite_defaults() {
        let config = StoreConfig::sqlite("/tmp/p.db");
        match &config {
            StoreConfig::Sqlite {
                path,
                busy_timeout_secs,
            } => {
                assert_eq!(path, &PathBuf::from("/tmp/p.db"));
                assert_eq!(*busy_timeout_secs, 5);
            }
            other => panic!("expected sqlite, got {other:?}"),
        }
        assert!(config.validate().is_ok());
    }
}
