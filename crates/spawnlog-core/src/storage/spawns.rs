//! Repository for spawn sighting database operations.
//!
//! Owns the idempotent upsert that makes repeated reports of the same
//! encounter a no-op, plus the read operations used by probes and
//! operational tooling.

use std::sync::Arc;

use chrono::Utc;
use sqlx::{Executor, PgConnection, PgPool, Postgres};

use crate::{error::Result, models::Spawn};

/// Repository for spawn sighting database operations.
pub struct Repository {
    pool: Arc<PgPool>,
}

impl Repository {
    /// Creates a new repository instance.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Returns a reference to the database pool.
    pub fn pool(&self) -> Arc<PgPool> {
        self.pool.clone()
    }

    /// Records a sighting, deduplicating on `encounter_id`.
    ///
    /// On conflict the existing row's `name` is rewritten to its own
    /// current value. The no-op update arm routes duplicates through the
    /// conflict path without refreshing any field, so first-seen values
    /// stay authoritative.
    ///
    /// # Errors
    ///
    /// Returns error if the statement fails for any reason other than the
    /// tolerated duplicate-key path.
    pub async fn upsert(&self, spawn: &Spawn) -> Result<()> {
        self.upsert_impl(&*self.pool, spawn).await
    }

    /// Records a sighting on an already-acquired connection.
    ///
    /// Used by the ingest handler, which scopes one connection to each
    /// request and releases it on every exit path.
    ///
    /// # Errors
    ///
    /// Returns error if the statement fails.
    pub async fn upsert_on(&self, conn: &mut PgConnection, spawn: &Spawn) -> Result<()> {
        self.upsert_impl(&mut *conn, spawn).await
    }

    /// Private helper running the upsert with a generic executor.
    async fn upsert_impl<'e, E>(&self, executor: E, spawn: &Spawn) -> Result<()>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO spawns (
                encounter_id, expiration_timestamp, latitude,
                longitude, name, spawn_point_id
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (encounter_id) DO UPDATE SET name = spawns.name
            "#,
        )
        .bind(&spawn.encounter_id)
        .bind(spawn.expiration_timestamp)
        .bind(spawn.latitude)
        .bind(spawn.longitude)
        .bind(&spawn.name)
        .bind(&spawn.spawn_point_id)
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Fetches a sighting by its encounter id.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    pub async fn find_by_encounter_id(&self, encounter_id: &str) -> Result<Option<Spawn>> {
        let spawn = sqlx::query_as::<_, Spawn>(
            r#"
            SELECT encounter_id, expiration_timestamp, latitude,
                   longitude, name, spawn_point_id
            FROM spawns
            WHERE encounter_id = $1
            "#,
        )
        .bind(encounter_id)
        .fetch_optional(&*self.pool)
        .await?;

        Ok(spawn)
    }

    /// Lists sightings that have not yet expired, soonest-expiring first.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    pub async fn list_active(&self) -> Result<Vec<Spawn>> {
        let now = Utc::now().timestamp();

        let spawns = sqlx::query_as::<_, Spawn>(
            r#"
            SELECT encounter_id, expiration_timestamp, latitude,
                   longitude, name, spawn_point_id
            FROM spawns
            WHERE expiration_timestamp > $1
            ORDER BY expiration_timestamp ASC
            "#,
        )
        .bind(now)
        .fetch_all(&*self.pool)
        .await?;

        Ok(spawns)
    }
}
