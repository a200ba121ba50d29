//! Database primitives shared by the CLI and the test suite.

use std::time::Duration;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, DbErr,
    Statement,
};
use thiserror::Error;
use tracing::{debug, info};

/// Shared connection alias.
pub type DbPool = DatabaseConnection;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database url missing (set {0})")]
    MissingUrl(String),
    #[error("invalid {key}: {value}")]
    InvalidSetting { key: String, value: String },
    #[error("database connection failed")]
    Connect(#[from] DbErr),
}

pub type DbResult<T> = Result<T, DbError>;

/// Environment-driven connection settings.
#[derive(Clone, Debug)]
pub struct DatabaseSettings {
    env_key: String,
    url: Option<String>,
    max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            env_key: "DATABASE_URL".to_string(),
            url: None,
            max_connections: 5,
        }
    }
}

impl DatabaseSettings {
    /// Settings pinned to an explicit url, bypassing the environment.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Reads `DATABASE_URL` and `DATABASE_MAX_CONNECTIONS`.
    pub fn from_env() -> DbResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DbResult<Self> {
        let mut settings = Self::default();
        settings.url = lookup(&settings.env_key).filter(|url| !url.trim().is_empty());
        if let Some(raw) = lookup("DATABASE_MAX_CONNECTIONS") {
            settings.max_connections = raw.trim().parse().map_err(|_| DbError::InvalidSetting {
                key: "DATABASE_MAX_CONNECTIONS".into(),
                value: raw.clone(),
            })?;
        }
        Ok(settings)
    }

    /// The url captured at construction; the environment is not consulted again.
    pub fn database_url(&self) -> DbResult<String> {
        self.url
            .clone()
            .ok_or_else(|| DbError::MissingUrl(self.env_key.clone()))
    }

    pub fn max_connections(&self) -> u32 {
        self.max_connections
    }
}

/// Opens a connection and enforces foreign keys on SQLite.
pub async fn connect(settings: &DatabaseSettings) -> DbResult<DbPool> {
    let url = settings.database_url()?;
    // Every connection to `sqlite::memory:` opens its own empty database.
    let max_connections = if url.contains(":memory:") {
        1
    } else {
        settings.max_connections
    };
    let mut options = ConnectOptions::new(url);
    options
        .max_connections(max_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    let db = Database::connect(options).await?;
    enable_foreign_keys(&db).await?;
    info!(backend = ?db.get_database_backend(), "database connected");
    Ok(db)
}

/// No-op outside SQLite, where foreign keys are always enforced.
pub async fn enable_foreign_keys(db: &DbPool) -> Result<(), DbErr> {
    if db.get_database_backend() == DatabaseBackend::Sqlite {
        db.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            "PRAGMA foreign_keys = ON;",
        ))
        .await?;
        debug!("sqlite foreign keys enabled");
    }
    Ok(())
}

/// Closes the pool; always called once the work is finished.
pub async fn close(db: DbPool) -> DbResult<()> {
    db.close().await?;
    debug!("database connection closed");
    Ok(())
}
