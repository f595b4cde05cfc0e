use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{AnimalStore, StoreError};
use crate::models::animal::{Animal, AnimalChanges};

/// Record store backed by a direct Postgres connection pool.
#[derive(Debug, Clone)]
pub struct PgAnimalStore {
    pool: PgPool,
}

impl PgAnimalStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl AnimalStore for PgAnimalStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Animal>, StoreError> {
        let animal = sqlx::query_as::<_, Animal>(
            "SELECT id, nama, jenis, usia, status_kesehatan, last_scanned FROM hewan WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(animal)
    }

    async fn touch_last_scanned(&self, id: &str, at: DateTime<Utc>) -> Result<(), StoreError> {
        sqlx::query("UPDATE hewan SET last_scanned = $2 WHERE id = $1")
            .bind(id)
            .bind(at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update(
        &self,
        id: &str,
        changes: &AnimalChanges,
    ) -> Result<Option<Animal>, StoreError> {
        let (set_status, status) = match &changes.status_kesehatan {
            Some(value) => (true, value.clone()),
            None => (false, None),
        };

        let animal = sqlx::query_as::<_, Animal>(
            r#"
            UPDATE hewan
            SET nama = $2,
                jenis = $3,
                usia = $4,
                status_kesehatan = CASE WHEN $5 THEN $6 ELSE status_kesehatan END
            WHERE id = $1
            RETURNING id, nama, jenis, usia, status_kesehatan, last_scanned
            "#,
        )
        .bind(id)
        .bind(&changes.nama)
        .bind(&changes.jenis)
        .bind(changes.usia)
        .bind(set_status)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(animal)
    }

    async fn delete(&self, id: &str) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM hewan WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
