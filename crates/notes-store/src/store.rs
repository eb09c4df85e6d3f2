//! Connection pool and store configuration.
//!
//! The `Store` is the process-wide connection factory. It does not run
//! queries against notes itself; callers open a [`Session`] per unit of work.

use std::str::FromStr;

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::error::{StoreError, StoreResult};
use crate::schema;
use crate::session::Session;

/// Configuration for connecting to the database.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Database connection URL.
    pub database_url: String,
    /// Maximum number of connections in the pool.
    pub max_connections: u32,
    /// Create the `notes` table on connect if it is missing.
    pub create_schema: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://notes.db?mode=rwc".to_string(),
            max_connections: 5,
            create_schema: true,
        }
    }
}

impl StoreConfig {
    /// Create configuration from environment variables.
    ///
    /// Reads:
    /// - `DATABASE_URL` - Optional, defaults to `sqlite://notes.db?mode=rwc`
    /// - `DATABASE_MAX_CONNECTIONS` - Optional, defaults to 5
    /// - `DATABASE_CREATE_SCHEMA` - Optional, defaults to true
    pub fn from_env() -> StoreResult<Self> {
        let defaults = Self::default();

        let database_url = std::env::var("DATABASE_URL").unwrap_or(defaults.database_url);

        let max_connections =
            parse_env("DATABASE_MAX_CONNECTIONS")?.unwrap_or(defaults.max_connections);

        let create_schema = std::env::var("DATABASE_CREATE_SCHEMA")
            .ok()
            .map(|s| s.to_lowercase() != "false" && s != "0")
            .unwrap_or(defaults.create_schema);

        Ok(Self {
            database_url,
            max_connections,
            create_schema,
        })
    }

    /// Configuration for a private in-memory database.
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            create_schema: true,
        }
    }

    /// Whether the URL names an in-memory database.
    ///
    /// Every SQLite connection to `:memory:` opens a separate database, so the
    /// pool for such a URL is held at one long-lived connection.
    pub fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }
}

fn parse_env<T: FromStr>(name: &str) -> StoreResult<Option<T>> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| StoreError::Config(format!("invalid value for {}: {:?}", name, raw))),
        Err(_) => Ok(None),
    }
}

/// Database store for the Notes Vault service.
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Connect to the database with the given configuration.
    ///
    /// Creates the schema if `config.create_schema` is true.
    pub async fn connect(config: StoreConfig) -> StoreResult<Self> {
        tracing::info!("Connecting to database...");

        let mut options = SqlitePoolOptions::new();
        if config.is_in_memory() {
            options = options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        } else {
            options = options.max_connections(config.max_connections);
        }

        let pool = options.connect(&config.database_url).await?;

        tracing::info!(url = %config.database_url, "Connected to database");

        if config.create_schema {
            schema::ensure_schema(&pool).await?;
        }

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Acquire a connection and open a session on it.
    ///
    /// The connection returns to the pool when the session is dropped.
    pub async fn session(&self) -> StoreResult<Session> {
        let conn = self.pool.acquire().await?;
        Ok(Session::new(conn))
    }

    /// Round-trip a trivial query to confirm the database is reachable.
    pub async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close every connection in the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
