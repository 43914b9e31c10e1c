//! PostgreSQL connection pool for pg-loadgen.
//!
//! Provides the CLI arguments for the connection target and pool bounds, and
//! [`PostgreSQLPool`], a bounded `sqlx` connection pool that the dispatcher
//! executes generated statements against.

pub mod args;
pub mod error;
pub mod pool;

pub use args::PostgreSQLPoolArgs;
pub use error::PostgreSQLPoolError;
pub use pool::{PoolOptions, PoolStatus, PostgreSQLPool};
