//! Like Repository Implementation
//!
//! PostgreSQL implementation of the LikeRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Like, LikeRepository};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct LikeRow {
    id: i64,
    post_id: i64,
    user_id: i64,
    created_at: DateTime<Utc>,
}

impl LikeRow {
    fn into_like(self) -> Like {
        Like {
            id: self.id,
            post_id: self.post_id,
            user_id: self.user_id,
            created_at: self.created_at,
        }
    }
}

/// PostgreSQL like repository implementation.
#[derive(Clone)]
pub struct PgLikeRepository {
    pool: PgPool,
}

impl PgLikeRepository {
    /// Create a new PgLikeRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LikeRepository for PgLikeRepository {
    async fn find(&self, post_id: i64, user_id: i64) -> Result<Option<Like>, AppError> {
        let row = sqlx::query_as::<_, LikeRow>(
            "SELECT id, post_id, user_id, created_at FROM likes WHERE post_id = $1 AND user_id = $2",
        )
        .bind(post_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_like()))
    }

    async fn create(&self, post_id: i64, user_id: i64) -> Result<Like, AppError> {
        let row = sqlx::query_as::<_, LikeRow>(
            r#"
            INSERT INTO likes (post_id, user_id)
            VALUES ($1, $2)
            RETURNING id, post_id, user_id, created_at
            "#,
        )
        .bind(post_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("Post already liked".to_string())
            }
            _ => AppError::Database(e),
        })?;

        Ok(row.into_like())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM likes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn count_by_post(&self, post_id: i64) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM likes WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
