use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{self, PgPool, QueryBuilder};
use uuid::Uuid;

use crate::{
    entities::project::{Project, ProjectInsert},
    errors::{map_slug_violation, AppError},
    repositories::sqlx_repo::SqlxProjectRepo,
};

const PROJECT_SLUG_CONSTRAINT: &str = "projects_slug_key";

const PROJECT_COLUMNS: &str =
    "id, title, slug, description, github_url, demo_url, technologies, image_url, created_at, featured";

#[async_trait]
pub trait ProjectRepository: Sync + Send {
    async fn create_project(&self, project: &ProjectInsert) -> Result<Project, AppError>;
    async fn get_project_by_id(&self, id: &Uuid) -> Result<Project, AppError>;
    async fn get_project_by_slug(&self, slug: &str) -> Result<Project, AppError>;
    async fn update_project(&self, project: &Project) -> Result<Project, AppError>;
    async fn delete_project(&self, id: &Uuid) -> Result<(), AppError>;
    /// All projects, newest first.
    async fn list_projects(&self) -> Result<Vec<Project>, AppError>;
    /// Featured projects, newest first, optionally capped.
    async fn list_featured_projects(&self, limit: Option<u32>) -> Result<Vec<Project>, AppError>;
    async fn count_projects(&self) -> Result<i64, AppError>;
}

#[async_trait]
impl<R> ProjectRepository for Arc<R>
where
    R: ProjectRepository + ?Sized,
{
    async fn create_project(&self, project: &ProjectInsert) -> Result<Project, AppError> {
        (**self).create_project(project).await
    }

    async fn get_project_by_id(&self, id: &Uuid) -> Result<Project, AppError> {
        (**self).get_project_by_id(id).await
    }

    async fn get_project_by_slug(&self, slug: &str) -> Result<Project, AppError> {
        (**self).get_project_by_slug(slug).await
    }

    async fn update_project(&self, project: &Project) -> Result<Project, AppError> {
        (**self).update_project(project).await
    }

    async fn delete_project(&self, id: &Uuid) -> Result<(), AppError> {
        (**self).delete_project(id).await
    }

    async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        (**self).list_projects().await
    }

    async fn list_featured_projects(&self, limit: Option<u32>) -> Result<Vec<Project>, AppError> {
        (**self).list_featured_projects(limit).await
    }

    async fn count_projects(&self) -> Result<i64, AppError> {
        (**self).count_projects().await
    }
}

impl SqlxProjectRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxProjectRepo { pool }
    }
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepo {
    async fn create_project(&self, project: &ProjectInsert) -> Result<Project, AppError> {
        let query = format!(
            r#"
            INSERT INTO projects (
                title, slug, description, github_url, demo_url, technologies,
                image_url, created_at, featured
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {PROJECT_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Project>(&query)
            .bind(&project.title)
            .bind(&project.slug)
            .bind(&project.description)
            .bind(&project.github_url)
            .bind(&project.demo_url)
            .bind(&project.technologies)
            .bind(&project.image_url)
            .bind(project.created_at)
            .bind(project.featured)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_slug_violation(e, PROJECT_SLUG_CONSTRAINT))
    }

    async fn get_project_by_id(&self, id: &Uuid) -> Result<Project, AppError> {
        let query = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1");

        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".into()))
    }

    async fn get_project_by_slug(&self, slug: &str) -> Result<Project, AppError> {
        let query = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE slug = $1");

        sqlx::query_as::<_, Project>(&query)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".into()))
    }

    async fn update_project(&self, project: &Project) -> Result<Project, AppError> {
        let query = format!(
            r#"
            UPDATE projects SET
                title = $1,
                slug = $2,
                description = $3,
                github_url = $4,
                demo_url = $5,
                technologies = $6,
                image_url = $7,
                created_at = $8,
                featured = $9
            WHERE id = $10
            RETURNING {PROJECT_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Project>(&query)
            .bind(&project.title)
            .bind(&project.slug)
            .bind(&project.description)
            .bind(&project.github_url)
            .bind(&project.demo_url)
            .bind(&project.technologies)
            .bind(&project.image_url)
            .bind(project.created_at)
            .bind(project.featured)
            .bind(project.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_slug_violation(e, PROJECT_SLUG_CONSTRAINT))?
            .ok_or_else(|| AppError::NotFound("Project not found".into()))
    }

    async fn delete_project(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Project not found".into()));
        }

        Ok(())
    }

    async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        let query = format!("SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at DESC, id");

        let projects = sqlx::query_as::<_, Project>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(projects)
    }

    async fn list_featured_projects(&self, limit: Option<u32>) -> Result<Vec<Project>, AppError> {
        let mut builder = QueryBuilder::new(format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE featured = TRUE ORDER BY created_at DESC, id"
        ));

        if let Some(limit) = limit {
            builder.push(" LIMIT ").push_bind(limit as i64);
        }

        let projects = builder
            .build_query_as::<Project>()
            .fetch_all(&self.pool)
            .await?;

        Ok(projects)
    }

    async fn count_projects(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
