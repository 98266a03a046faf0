//! Image Repository Implementation
//!
//! PostgreSQL implementation of the ImageRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Image, ImageRepository, StoredObject};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct ImageRow {
    id: i64,
    post_id: i64,
    name: String,
    path: String,
    created_at: DateTime<Utc>,
}

impl ImageRow {
    fn into_image(self) -> Image {
        Image {
            id: self.id,
            post_id: self.post_id,
            name: self.name,
            path: self.path,
            created_at: self.created_at,
        }
    }
}

/// PostgreSQL image repository implementation.
#[derive(Clone)]
pub struct PgImageRepository {
    pool: PgPool,
}

impl PgImageRepository {
    /// Create a new PgImageRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ImageRepository for PgImageRepository {
    async fn find_by_post(&self, post_id: i64) -> Result<Vec<Image>, AppError> {
        let rows = sqlx::query_as::<_, ImageRow>(
            r#"
            SELECT id, post_id, name, path, created_at
            FROM images
            WHERE post_id = $1
            ORDER BY id
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_image()).collect())
    }

    async fn create(&self, post_id: i64, stored: &StoredObject) -> Result<Image, AppError> {
        let row = sqlx::query_as::<_, ImageRow>(
            r#"
            INSERT INTO images (post_id, name, path)
            VALUES ($1, $2, $3)
            RETURNING id, post_id, name, path, created_at
            "#,
        )
        .bind(post_id)
        .bind(&stored.name)
        .bind(&stored.url)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_image())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM images WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
