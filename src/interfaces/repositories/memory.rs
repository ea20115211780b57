//! Process-local stores backing the repository traits without a database.
//! Used by the integration tests and handy for local previews.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    entities::{
        post::{Post, PostInsert},
        project::{Project, ProjectInsert},
    },
    errors::AppError,
    repositories::{post::PostRepository, project::ProjectRepository},
};

fn slug_conflict() -> AppError {
    AppError::Conflict("Slug already exists".into())
}

fn newest_first_posts(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
}

fn newest_first_projects(projects: &mut [Project]) {
    projects.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
}

#[derive(Clone, Default)]
pub struct InMemoryPostRepo {
    posts: Arc<RwLock<HashMap<Uuid, Post>>>,
}

impl InMemoryPostRepo {
    pub fn new() -> Self {
        Self::default()
    }

    async fn sorted(&self, published_only: bool) -> Vec<Post> {
        let posts = self.posts.read().await;
        let mut found: Vec<Post> = posts
            .values()
            .filter(|p| !published_only || p.published)
            .cloned()
            .collect();
        newest_first_posts(&mut found);
        found
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepo {
    async fn create_post(&self, post: &PostInsert) -> Result<Post, AppError> {
        let mut posts = self.posts.write().await;
        if posts.values().any(|p| p.slug == post.slug) {
            return Err(slug_conflict());
        }

        let created = Post {
            id: Uuid::new_v4(),
            title: post.title.clone(),
            slug: post.slug.clone(),
            content: post.content.clone(),
            excerpt: post.excerpt.clone(),
            image_url: post.image_url.clone(),
            created_at: post.created_at,
            updated_at: post.updated_at,
            tags: post.tags.clone(),
            published: post.published,
        };
        posts.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_post_by_id(&self, id: &Uuid) -> Result<Post, AppError> {
        self.posts
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Post not found".into()))
    }

    async fn get_published_post_by_slug(&self, slug: &str) -> Result<Post, AppError> {
        self.posts
            .read()
            .await
            .values()
            .find(|p| p.slug == slug && p.published)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Post not found".into()))
    }

    async fn update_post(&self, post: &Post) -> Result<Post, AppError> {
        let mut posts = self.posts.write().await;
        if !posts.contains_key(&post.id) {
            return Err(AppError::NotFound("Post not found".into()));
        }
        if posts.values().any(|p| p.id != post.id && p.slug == post.slug) {
            return Err(slug_conflict());
        }
        posts.insert(post.id, post.clone());
        Ok(post.clone())
    }

    async fn delete_post(&self, id: &Uuid) -> Result<(), AppError> {
        self.posts
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("Post not found".into()))
    }

    async fn list_published_posts(&self, limit: i64, offset: i64) -> Result<Vec<Post>, AppError> {
        Ok(self
            .sorted(true)
            .await
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn list_all_posts(&self) -> Result<Vec<Post>, AppError> {
        Ok(self.sorted(false).await)
    }

    async fn count_posts(&self, published_only: bool) -> Result<i64, AppError> {
        let posts = self.posts.read().await;
        Ok(posts.values().filter(|p| !published_only || p.published).count() as i64)
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryProjectRepo {
    projects: Arc<RwLock<HashMap<Uuid, Project>>>,
}

impl InMemoryProjectRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepo {
    async fn create_project(&self, project: &ProjectInsert) -> Result<Project, AppError> {
        let mut projects = self.projects.write().await;
        if projects.values().any(|p| p.slug == project.slug) {
            return Err(slug_conflict());
        }

        let created = Project {
            id: Uuid::new_v4(),
            title: project.title.clone(),
            slug: project.slug.clone(),
            description: project.description.clone(),
            github_url: project.github_url.clone(),
            demo_url: project.demo_url.clone(),
            technologies: project.technologies.clone(),
            image_url: project.image_url.clone(),
            created_at: project.created_at,
            featured: project.featured,
        };
        projects.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_project_by_id(&self, id: &Uuid) -> Result<Project, AppError> {
        self.projects
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Project not found".into()))
    }

    async fn get_project_by_slug(&self, slug: &str) -> Result<Project, AppError> {
        self.projects
            .read()
            .await
            .values()
            .find(|p| p.slug == slug)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Project not found".into()))
    }

    async fn update_project(&self, project: &Project) -> Result<Project, AppError> {
        let mut projects = self.projects.write().await;
        if !projects.contains_key(&project.id) {
            return Err(AppError::NotFound("Project not found".into()));
        }
        if projects.values().any(|p| p.id != project.id && p.slug == project.slug) {
            return Err(slug_conflict());
        }
        projects.insert(project.id, project.clone());
        Ok(project.clone())
    }

    async fn delete_project(&self, id: &Uuid) -> Result<(), AppError> {
        self.projects
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("Project not found".into()))
    }

    async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        let mut found: Vec<Project> = self.projects.read().await.values().cloned().collect();
        newest_first_projects(&mut found);
        Ok(found)
    }

    async fn list_featured_projects(&self, limit: Option<u32>) -> Result<Vec<Project>, AppError> {
        let mut found: Vec<Project> = self
            .projects
            .read()
            .await
            .values()
            .filter(|p| p.featured)
            .cloned()
            .collect();
        newest_first_projects(&mut found);
        if let Some(limit) = limit {
            found.truncate(limit as usize);
        }
        Ok(found)
    }

    async fn count_projects(&self) -> Result<i64, AppError> {
        Ok(self.projects.read().await.len() as i64)
    }
}
