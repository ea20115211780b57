use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{self, PgPool};
use uuid::Uuid;

use crate::{
    entities::post::{Post, PostInsert},
    errors::{map_slug_violation, AppError},
    repositories::sqlx_repo::SqlxPostRepo,
};

const POST_SLUG_CONSTRAINT: &str = "posts_slug_key";

const POST_COLUMNS: &str =
    "id, title, slug, content, excerpt, image_url, created_at, updated_at, tags, published";

#[async_trait]
pub trait PostRepository: Sync + Send {
    async fn create_post(&self, post: &PostInsert) -> Result<Post, AppError>;
    async fn get_post_by_id(&self, id: &Uuid) -> Result<Post, AppError>;
    /// Only published posts are reachable by slug.
    async fn get_published_post_by_slug(&self, slug: &str) -> Result<Post, AppError>;
    async fn update_post(&self, post: &Post) -> Result<Post, AppError>;
    async fn delete_post(&self, id: &Uuid) -> Result<(), AppError>;
    /// Published posts, newest first.
    async fn list_published_posts(&self, limit: i64, offset: i64) -> Result<Vec<Post>, AppError>;
    async fn list_all_posts(&self) -> Result<Vec<Post>, AppError>;
    async fn count_posts(&self, published_only: bool) -> Result<i64, AppError>;
    async fn check_connection(&self) -> Result<(), AppError>;
}

#[async_trait]
impl<R> PostRepository for Arc<R>
where
    R: PostRepository + ?Sized,
{
    async fn create_post(&self, post: &PostInsert) -> Result<Post, AppError> {
        (**self).create_post(post).await
    }

    async fn get_post_by_id(&self, id: &Uuid) -> Result<Post, AppError> {
        (**self).get_post_by_id(id).await
    }

    async fn get_published_post_by_slug(&self, slug: &str) -> Result<Post, AppError> {
        (**self).get_published_post_by_slug(slug).await
    }

    async fn update_post(&self, post: &Post) -> Result<Post, AppError> {
        (**self).update_post(post).await
    }

    async fn delete_post(&self, id: &Uuid) -> Result<(), AppError> {
        (**self).delete_post(id).await
    }

    async fn list_published_posts(&self, limit: i64, offset: i64) -> Result<Vec<Post>, AppError> {
        (**self).list_published_posts(limit, offset).await
    }

    async fn list_all_posts(&self) -> Result<Vec<Post>, AppError> {
        (**self).list_all_posts().await
    }

    async fn count_posts(&self, published_only: bool) -> Result<i64, AppError> {
        (**self).count_posts(published_only).await
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        (**self).check_connection().await
    }
}

impl SqlxPostRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxPostRepo { pool }
    }
}

#[async_trait]
impl PostRepository for SqlxPostRepo {
    async fn create_post(&self, post: &PostInsert) -> Result<Post, AppError> {
        let query = format!(
            r#"
            INSERT INTO posts (
                title, slug, content, excerpt, image_url, created_at, updated_at, tags, published
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {POST_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Post>(&query)
            .bind(&post.title)
            .bind(&post.slug)
            .bind(&post.content)
            .bind(&post.excerpt)
            .bind(&post.image_url)
            .bind(post.created_at)
            .bind(post.updated_at)
            .bind(&post.tags)
            .bind(post.published)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_slug_violation(e, POST_SLUG_CONSTRAINT))
    }

    async fn get_post_by_id(&self, id: &Uuid) -> Result<Post, AppError> {
        let query = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1");

        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".into()))
    }

    async fn get_published_post_by_slug(&self, slug: &str) -> Result<Post, AppError> {
        let query = format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE slug = $1 AND published = TRUE"
        );

        sqlx::query_as::<_, Post>(&query)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".into()))
    }

    async fn update_post(&self, post: &Post) -> Result<Post, AppError> {
        let query = format!(
            r#"
            UPDATE posts SET
                title = $1,
                slug = $2,
                content = $3,
                excerpt = $4,
                image_url = $5,
                created_at = $6,
                updated_at = $7,
                tags = $8,
                published = $9
            WHERE id = $10
            RETURNING {POST_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Post>(&query)
            .bind(&post.title)
            .bind(&post.slug)
            .bind(&post.content)
            .bind(&post.excerpt)
            .bind(&post.image_url)
            .bind(post.created_at)
            .bind(post.updated_at)
            .bind(&post.tags)
            .bind(post.published)
            .bind(post.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_slug_violation(e, POST_SLUG_CONSTRAINT))?
            .ok_or_else(|| AppError::NotFound("Post not found".into()))
    }

    async fn delete_post(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Post not found".into()));
        }

        Ok(())
    }

    async fn list_published_posts(&self, limit: i64, offset: i64) -> Result<Vec<Post>, AppError> {
        let query = format!(
            r#"
            SELECT {POST_COLUMNS} FROM posts
            WHERE published = TRUE
            ORDER BY created_at DESC, id
            LIMIT $1 OFFSET $2
            "#
        );

        let posts = sqlx::query_as::<_, Post>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(posts)
    }

    async fn list_all_posts(&self) -> Result<Vec<Post>, AppError> {
        let query = format!("SELECT {POST_COLUMNS} FROM posts ORDER BY created_at DESC, id");

        let posts = sqlx::query_as::<_, Post>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(posts)
    }

    async fn count_posts(&self, published_only: bool) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM posts
            WHERE ($1::boolean IS FALSE OR published = TRUE)
            "#
        )
        .bind(published_only)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
