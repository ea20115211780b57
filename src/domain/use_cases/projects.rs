use validator::Validate;

use crate::{
    entities::project::{
        NewProjectRequest, Project, ProjectDetail, ProjectInsert, ProjectListing, UpdateProjectRequest,
    },
    errors::AppError,
    repositories::project::ProjectRepository,
    utils::valid_uuid::valid_uuid,
};

pub struct ProjectHandler<R>
where
    R: ProjectRepository,
{
    pub project_repo: R,
}

impl<R> ProjectHandler<R>
where
    R: ProjectRepository,
{
    pub fn new(project_repo: R) -> Self {
        ProjectHandler { project_repo }
    }

    pub async fn create_project(&self, request: NewProjectRequest) -> Result<Project, AppError> {
        let insert = ProjectInsert::try_from(request)?;
        let project = self.project_repo.create_project(&insert).await?;

        tracing::info!(project_id = %project.id, slug = %project.slug, "Project created");
        Ok(project)
    }

    pub async fn get_project_by_id(&self, id: &str) -> Result<Project, AppError> {
        let valid_id = valid_uuid(id)?;
        self.project_repo.get_project_by_id(&valid_id).await
    }

    /// Every project plus the featured subset, both newest first.
    pub async fn list_projects(&self) -> Result<ProjectListing, AppError> {
        let projects = self.project_repo.list_projects().await?;
        let featured = self.project_repo.list_featured_projects(None).await?;

        Ok(ProjectListing { projects, featured })
    }

    pub async fn get_project(&self, slug: &str) -> Result<ProjectDetail, AppError> {
        let project = self.project_repo.get_project_by_slug(slug).await?;
        let technologies = project.technology_list();

        Ok(ProjectDetail { project, technologies })
    }

    pub async fn list_all_projects(&self) -> Result<Vec<Project>, AppError> {
        self.project_repo.list_projects().await
    }

    pub async fn update_project(
        &self,
        id: &str,
        changes: UpdateProjectRequest,
    ) -> Result<Project, AppError> {
        changes.validate()?;
        let valid_id = valid_uuid(id)?;

        let mut project = self.project_repo.get_project_by_id(&valid_id).await?;
        changes.apply_to(&mut project);

        self.project_repo.update_project(&project).await
    }

    pub async fn delete_project(&self, id: &str) -> Result<(), AppError> {
        let valid_id = valid_uuid(id)?;
        self.project_repo.delete_project(&valid_id).await
    }
}
