use chrono::Utc;
use validator::Validate;

use crate::{
    entities::{
        pagination::{Page, PageWindow},
        post::{MarkdownPreviewResponse, NewPostRequest, Post, PostDetail, PostInsert, UpdatePostRequest},
    },
    errors::AppError,
    repositories::post::PostRepository,
    utils::{markdown::MarkdownRenderer, valid_uuid::valid_uuid},
};

pub struct PostHandler<R>
where
    R: PostRepository,
{
    pub post_repo: R,
    pub renderer: MarkdownRenderer,
    pub per_page: u32,
}

impl<R> PostHandler<R>
where
    R: PostRepository,
{
    pub fn new(post_repo: R, renderer: MarkdownRenderer, per_page: u32) -> Self {
        PostHandler { post_repo, renderer, per_page }
    }

    /// Validates the request, assigns the slug and stores the post.
    pub async fn create_post(&self, request: NewPostRequest) -> Result<Post, AppError> {
        let insert = PostInsert::try_from(request)?;
        let post = self.post_repo.create_post(&insert).await?;

        tracing::info!(post_id = %post.id, slug = %post.slug, "Post created");
        Ok(post)
    }

    pub async fn get_post_by_id(&self, id: &str) -> Result<Post, AppError> {
        let valid_id = valid_uuid(id)?;
        self.post_repo.get_post_by_id(&valid_id).await
    }

    /// One page of published posts for the public blog listing.
    pub async fn list_published_posts(&self, page: Option<&str>) -> Result<Page<Post>, AppError> {
        let total = self.post_repo.count_posts(true).await?;
        let window = PageWindow::resolve(page, total, self.per_page);

        let posts = self
            .post_repo
            .list_published_posts(window.limit(), window.offset())
            .await?;

        Ok(Page::new(posts, window, total))
    }

    /// A published post with its rendered body. Drafts look exactly like
    /// missing posts.
    pub async fn get_published_post(&self, slug: &str) -> Result<PostDetail, AppError> {
        let post = self
            .post_repo
            .get_published_post_by_slug(slug)
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::NotFound("Post not found".to_string()),
                _ => e,
            })?;

        let content_html = self.renderer.render(&post.content);
        let tags = post.tag_list();

        Ok(PostDetail { post, content_html, tags })
    }

    pub async fn list_all_posts(&self) -> Result<Vec<Post>, AppError> {
        self.post_repo.list_all_posts().await
    }

    pub async fn count_published_posts(&self) -> Result<i64, AppError> {
        self.post_repo.count_posts(true).await
    }

    /// Applies a partial update; every save refreshes `updated_at`.
    pub async fn update_post(&self, id: &str, changes: UpdatePostRequest) -> Result<Post, AppError> {
        changes.validate()?;
        let valid_id = valid_uuid(id)?;

        let mut post = self.post_repo.get_post_by_id(&valid_id).await?;
        changes.apply_to(&mut post);
        post.updated_at = Utc::now();

        self.post_repo.update_post(&post).await
    }

    pub async fn delete_post(&self, id: &str) -> Result<(), AppError> {
        let valid_id = valid_uuid(id)?;
        self.post_repo.delete_post(&valid_id).await.map_err(|e| match e {
            AppError::NotFound(_) => AppError::NotFound("Post not found".to_string()),
            _ => e,
        })
    }

    pub fn preview(&self, content: &str) -> MarkdownPreviewResponse {
        MarkdownPreviewResponse {
            html: self.renderer.render(content),
        }
    }

    pub async fn check_connection(&self) -> Result<(), AppError> {
        self.post_repo.check_connection().await
    }
}
