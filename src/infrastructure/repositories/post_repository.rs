//! Post Repository Implementation
//!
//! PostgreSQL implementation of the PostRepository trait. Listing queries
//! join the author and compute like/comment counts and tag names per row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::domain::{
    NewPost, PageRequest, Post, PostKind, PostOrder, PostRepository, PostSearch, PostStatus,
    PostSummary, QuestionStatus, StudyStatus,
};
use crate::shared::error::AppError;

const POST_COLUMNS: &str = r#"
    p.id, p.user_id, p.kind, p.title, p.content, p.hit,
    p.study_status, p.question_status, p.created_at, p.last_modified_at
"#;

const SUMMARY_SELECT: &str = r#"
    SELECT p.id, p.user_id, p.kind, p.title, p.content, p.hit,
           p.study_status, p.question_status, p.created_at, p.last_modified_at,
           u.username,
           (SELECT COUNT(*) FROM likes l WHERE l.post_id = p.id) AS likes,
           (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id AND NOT c.deleted) AS comments,
           COALESCE(
               (SELECT array_agg(t.name::TEXT ORDER BY pt.id)
                FROM post_tags pt JOIN tags t ON t.id = pt.tag_id
                WHERE pt.post_id = p.id),
               '{}'::TEXT[]
           ) AS tags
    FROM posts p
    JOIN users u ON u.id = p.user_id
"#;

/// Database row representation of the posts table.
#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: i64,
    user_id: i64,
    kind: String,
    title: String,
    content: String,
    hit: i64,
    study_status: Option<String>,
    question_status: Option<String>,
    created_at: DateTime<Utc>,
    last_modified_at: DateTime<Utc>,
}

impl PostRow {
    fn into_post(self) -> Result<Post, AppError> {
        let kind = PostKind::from_str(&self.kind)
            .ok_or_else(|| AppError::Internal(format!("Unknown post kind: {}", self.kind)))?;

        Ok(Post {
            id: self.id,
            user_id: self.user_id,
            kind,
            title: self.title,
            content: self.content,
            hit: self.hit,
            study_status: self.study_status.as_deref().and_then(StudyStatus::from_str),
            question_status: self.question_status.as_deref().and_then(QuestionStatus::from_str),
            created_at: self.created_at,
            last_modified_at: self.last_modified_at,
        })
    }
}

/// Post row joined with author and aggregates.
#[derive(Debug, sqlx::FromRow)]
struct PostSummaryRow {
    #[sqlx(flatten)]
    post: PostRow,
    username: String,
    likes: i64,
    comments: i64,
    tags: Vec<String>,
}

impl PostSummaryRow {
    fn into_summary(self) -> Result<PostSummary, AppError> {
        Ok(PostSummary {
            post: self.post.into_post()?,
            username: self.username,
            likes: self.likes,
            comments: self.comments,
            tags: self.tags,
        })
    }
}

fn into_summaries(rows: Vec<PostSummaryRow>) -> Result<Vec<PostSummary>, AppError> {
    rows.into_iter().map(PostSummaryRow::into_summary).collect()
}

/// Escape LIKE wildcards in user input and wrap it for a substring match.
fn like_pattern(sentence: &str) -> String {
    let escaped = sentence
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Append the WHERE clause shared by the search and its count query.
fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, kind: PostKind, search: &PostSearch) {
    qb.push(" WHERE p.kind = ").push_bind(kind.as_str());

    if let Some(sentence) = search.sentence.as_deref().filter(|s| !s.trim().is_empty()) {
        let pattern = like_pattern(sentence.trim());
        qb.push(" AND (p.title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR p.content ILIKE ")
            .push_bind(pattern)
            .push(")");
    }

    if !search.tags.is_empty() {
        qb.push(
            " AND EXISTS (SELECT 1 FROM post_tags fpt JOIN tags ft ON ft.id = fpt.tag_id \
             WHERE fpt.post_id = p.id AND ft.name = ANY(",
        )
        .push_bind(search.tags.clone())
        .push("))");
    }

    match search.status {
        Some(PostStatus::Study(s)) => {
            qb.push(" AND p.study_status = ").push_bind(s.as_str());
        }
        Some(PostStatus::Question(q)) => {
            qb.push(" AND p.question_status = ").push_bind(q.as_str());
        }
        None => {}
    }
}

fn order_clause(order: PostOrder) -> &'static str {
    match order {
        PostOrder::Latest => " ORDER BY p.created_at DESC, p.id DESC",
        PostOrder::Hits => " ORDER BY p.hit DESC, p.id DESC",
        PostOrder::Likes => " ORDER BY likes DESC, p.id DESC",
        PostOrder::Comments => " ORDER BY comments DESC, p.id DESC",
    }
}

/// PostgreSQL post repository implementation.
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PgPostRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn find_by_id(&self, kind: PostKind, id: i64) -> Result<Option<PostSummary>, AppError> {
        let row = sqlx::query_as::<_, PostSummaryRow>(&format!(
            "{} WHERE p.id = $1 AND p.kind = $2",
            SUMMARY_SELECT
        ))
        .bind(id)
        .bind(kind.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(PostSummaryRow::into_summary).transpose()
    }

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM posts WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    /// Insert the post and its tag links in one transaction.
    async fn create(&self, post: &NewPost, tag_ids: &[i64]) -> Result<Post, AppError> {
        let (study_status, question_status) = match post.status {
            Some(PostStatus::Study(s)) => (Some(s.as_str()), None),
            Some(PostStatus::Question(q)) => (None, Some(q.as_str())),
            None => (None, None),
        };

        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, PostRow>(&format!(
            r#"
            INSERT INTO posts AS p (user_id, kind, title, content, study_status, question_status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            POST_COLUMNS
        ))
        .bind(post.user_id)
        .bind(post.kind.as_str())
        .bind(&post.title)
        .bind(&post.content)
        .bind(study_status)
        .bind(question_status)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO post_tags (post_id, tag_id)
            SELECT $1, tag_id FROM UNNEST($2::BIGINT[]) WITH ORDINALITY AS t(tag_id, ord)
            ORDER BY ord
            ON CONFLICT (post_id, tag_id) DO NOTHING
            "#,
        )
        .bind(row.id)
        .bind(tag_ids)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        row.into_post()
    }

    async fn update_content(&self, id: i64, title: &str, content: &str) -> Result<Post, AppError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            r#"
            UPDATE posts AS p
            SET title = $2, content = $3, last_modified_at = NOW()
            WHERE p.id = $1
            RETURNING {}
            "#,
            POST_COLUMNS
        ))
        .bind(id)
        .bind(title)
        .bind(content)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

        row.into_post()
    }

    async fn increment_hit(&self, id: i64) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("UPDATE posts SET hit = hit + 1 WHERE id = $1 RETURNING hit")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))
    }

    async fn update_status(&self, id: i64, status: PostStatus) -> Result<(), AppError> {
        let sql = match status {
            PostStatus::Study(_) => "UPDATE posts SET study_status = $2 WHERE id = $1 AND kind = 'study'",
            PostStatus::Question(_) => {
                "UPDATE posts SET question_status = $2 WHERE id = $1 AND kind = 'question'"
            }
        };

        let result = sqlx::query(sql)
            .bind(id)
            .bind(status.as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Post not found".to_string()));
        }
        Ok(())
    }

    /// Swap the tag links of a post in one transaction.
    async fn replace_tags(&self, id: i64, tag_ids: &[i64]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM post_tags WHERE post_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO post_tags (post_id, tag_id)
            SELECT $1, tag_id FROM UNNEST($2::BIGINT[]) WITH ORDINALITY AS t(tag_id, ord)
            ORDER BY ord
            ON CONFLICT (post_id, tag_id) DO NOTHING
            "#,
        )
        .bind(id)
        .bind(tag_ids)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Post not found".to_string()));
        }
        Ok(())
    }

    async fn search(
        &self,
        kind: PostKind,
        search: &PostSearch,
        page: PageRequest,
    ) -> Result<(Vec<PostSummary>, i64), AppError> {
        let mut count_qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM posts p");
        push_filters(&mut count_qb, kind, search);
        let total = count_qb
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        let mut qb = QueryBuilder::<Postgres>::new(SUMMARY_SELECT);
        push_filters(&mut qb, kind, search);
        qb.push(order_clause(search.order))
            .push(" LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        let rows = qb
            .build_query_as::<PostSummaryRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok((into_summaries(rows)?, total))
    }

    async fn top_by_hits(&self, kind: PostKind, limit: i64) -> Result<Vec<PostSummary>, AppError> {
        let rows = sqlx::query_as::<_, PostSummaryRow>(&format!(
            "{} WHERE p.kind = $1 ORDER BY p.hit DESC, p.id DESC LIMIT $2",
            SUMMARY_SELECT
        ))
        .bind(kind.as_str())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        into_summaries(rows)
    }

    async fn top_by_likes(&self, kind: PostKind, limit: i64) -> Result<Vec<PostSummary>, AppError> {
        let rows = sqlx::query_as::<_, PostSummaryRow>(&format!(
            "{} WHERE p.kind = $1 ORDER BY likes DESC, p.id DESC LIMIT $2",
            SUMMARY_SELECT
        ))
        .bind(kind.as_str())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        into_summaries(rows)
    }

    async fn count(&self, kind: PostKind) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts WHERE kind = $1")
            .bind(kind.as_str())
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn find_by_user(&self, kind: PostKind, user_id: i64) -> Result<Vec<PostSummary>, AppError> {
        let rows = sqlx::query_as::<_, PostSummaryRow>(&format!(
            "{} WHERE p.kind = $1 AND p.user_id = $2 ORDER BY p.created_at DESC, p.id DESC",
            SUMMARY_SELECT
        ))
        .bind(kind.as_str())
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        into_summaries(rows)
    }

    async fn find_liked_by_user(
        &self,
        kind: PostKind,
        user_id: i64,
    ) -> Result<Vec<PostSummary>, AppError> {
        let rows = sqlx::query_as::<_, PostSummaryRow>(&format!(
            r#"
            {}
            JOIN likes lk ON lk.post_id = p.id
            WHERE p.kind = $1 AND lk.user_id = $2
            ORDER BY lk.created_at DESC, lk.id DESC
            "#,
            SUMMARY_SELECT
        ))
        .bind(kind.as_str())
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        into_summaries(rows)
    }
}
