//! PostgreSQL binding for the dispatcher.

use crate::dispatch::QueryExecutor;
use async_trait::async_trait;
use loadgen_postgresql::PostgreSQLPool;

#[async_trait]
impl QueryExecutor for PostgreSQLPool {
    async fn execute(&self, query: &str) -> anyhow::Result<()> {
        PostgreSQLPool::execute(self, query).await?;
        Ok(())
    }
}
