//! Comment Repository Implementation
//!
//! PostgreSQL implementation of the CommentRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Comment, CommentRepository, CommentView, NewComment};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct CommentRow {
    id: i64,
    post_id: i64,
    user_id: i64,
    contents: String,
    parent: Option<i64>,
    group_num: i64,
    deleted: bool,
    created_at: DateTime<Utc>,
    last_modified_at: DateTime<Utc>,
}

impl CommentRow {
    fn into_comment(self) -> Comment {
        Comment {
            id: self.id,
            post_id: self.post_id,
            user_id: self.user_id,
            contents: self.contents,
            parent: self.parent,
            group_num: self.group_num,
            deleted: self.deleted,
            created_at: self.created_at,
            last_modified_at: self.last_modified_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CommentViewRow {
    #[sqlx(flatten)]
    comment: CommentRow,
    username: String,
}

/// PostgreSQL comment repository implementation.
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Create a new PgCommentRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, AppError> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, post_id, user_id, contents, parent, group_num, deleted,
                   created_at, last_modified_at
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_comment()))
    }

    async fn find_by_post(&self, post_id: i64) -> Result<Vec<CommentView>, AppError> {
        let rows = sqlx::query_as::<_, CommentViewRow>(
            r#"
            SELECT c.id, c.post_id, c.user_id, c.contents, c.parent, c.group_num, c.deleted,
                   c.created_at, c.last_modified_at, u.username
            FROM comments c
            JOIN users u ON u.id = c.user_id
            WHERE c.post_id = $1
            ORDER BY c.group_num, c.created_at, c.id
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| CommentView {
                comment: r.comment.into_comment(),
                username: r.username,
            })
            .collect())
    }

    async fn max_group_num(&self, post_id: i64) -> Result<i64, AppError> {
        let max = sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(MAX(group_num), 0) FROM comments WHERE post_id = $1",
        )
        .bind(post_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(max)
    }

    async fn create(&self, comment: &NewComment) -> Result<Comment, AppError> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            INSERT INTO comments (post_id, user_id, contents, parent, group_num)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, post_id, user_id, contents, parent, group_num, deleted,
                      created_at, last_modified_at
            "#,
        )
        .bind(comment.post_id)
        .bind(comment.user_id)
        .bind(&comment.contents)
        .bind(comment.parent)
        .bind(comment.group_num)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_comment())
    }

    async fn update_contents(&self, id: i64, contents: &str) -> Result<Comment, AppError> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            UPDATE comments
            SET contents = $2, last_modified_at = NOW()
            WHERE id = $1
            RETURNING id, post_id, user_id, contents, parent, group_num, deleted,
                      created_at, last_modified_at
            "#,
        )
        .bind(id)
        .bind(contents)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;

        Ok(row.into_comment())
    }

    async fn soft_delete(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE comments SET deleted = TRUE, last_modified_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
