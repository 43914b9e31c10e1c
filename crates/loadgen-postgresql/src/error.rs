//! Error types for the PostgreSQL pool.

use thiserror::Error;

/// Errors that can occur while connecting or executing queries.
#[derive(Error, Debug)]
pub enum PostgreSQLPoolError {
    /// PostgreSQL connection or query error.
    #[error("PostgreSQL error: {0}")]
    PostgreSQL(#[from] sqlx::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The pool no longer hands out connections.
    #[error("Connection pool is closed")]
    Closed,
}
