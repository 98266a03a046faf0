//! Tag Repository Implementation
//!
//! PostgreSQL implementation of the TagRepository trait.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{Tag, TagRepository};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct TagRow {
    id: i64,
    name: String,
}

/// PostgreSQL tag repository implementation.
#[derive(Clone)]
pub struct PgTagRepository {
    pool: PgPool,
}

impl PgTagRepository {
    /// Create a new PgTagRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagRepository for PgTagRepository {
    /// Insert missing names, then read every requested tag back.
    ///
    /// `ON CONFLICT DO NOTHING` lets concurrent creators of the same name
    /// both succeed.
    async fn find_or_create(&self, names: &[String]) -> Result<Vec<Tag>, AppError> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO tags (name)
            SELECT UNNEST($1::VARCHAR[])
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(names)
        .execute(&mut *tx)
        .await?;

        let rows = sqlx::query_as::<_, TagRow>("SELECT id, name FROM tags WHERE name = ANY($1)")
            .bind(names)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        let mut by_name: HashMap<String, i64> = rows.into_iter().map(|r| (r.name, r.id)).collect();
        names
            .iter()
            .map(|name| {
                by_name
                    .remove(name)
                    .map(|id| Tag {
                        id,
                        name: name.clone(),
                    })
                    .ok_or_else(|| AppError::Internal(format!("Tag {} missing after insert", name)))
            })
            .collect()
    }

    async fn find_names_by_post(&self, post_id: i64) -> Result<Vec<String>, AppError> {
        let names = sqlx::query_scalar::<_, String>(
            r#"
            SELECT t.name
            FROM post_tags pt
            JOIN tags t ON t.id = pt.tag_id
            WHERE pt.post_id = $1
            ORDER BY pt.id
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(names)
    }
}
