//! Database access layer implementing the repository pattern for spawn
//! persistence.
//!
//! The repository layer translates between the domain model and the
//! database schema. All database operations go through these repositories;
//! direct SQL outside this module is forbidden to keep the dedup semantics
//! in one place.

use std::sync::Arc;

use sqlx::PgPool;

pub mod spawns;

use crate::error::Result;

/// Container for repository instances providing unified database access.
#[derive(Clone)]
pub struct Storage {
    /// Repository for spawn sighting operations.
    pub spawns: Arc<spawns::Repository>,
}

impl Storage {
    /// Creates a new storage instance with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        let pool = Arc::new(pool);

        Self { spawns: Arc::new(spawns::Repository::new(pool)) }
    }

    /// Performs a health check on the database connection.
    ///
    /// Executes a simple query to verify connectivity. Used by the
    /// readiness probe.
    ///
    /// # Errors
    ///
    /// Returns `CoreError` if the connection is unhealthy or the query
    /// times out.
    pub async fn health_check(&self) -> Result<()> {
        let _: (i32,) = sqlx::query_as("SELECT 1").fetch_one(&*self.spawns.pool()).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn storage_can_be_created() {
        // Actual database behavior is covered by integration tests.
        let pool = sqlx::PgPool::connect_lazy("postgresql://test").unwrap();
        let _storage = Storage::new(pool);
    }
}
