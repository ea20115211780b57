use crate::{
    entities::project::HomeSummary,
    errors::AppError,
    repositories::{post::PostRepository, project::ProjectRepository},
};

pub struct HomeHandler<P, B>
where
    P: ProjectRepository,
    B: PostRepository,
{
    pub project_repo: P,
    pub post_repo: B,
    pub featured_limit: u32,
}

impl<P, B> HomeHandler<P, B>
where
    P: ProjectRepository,
    B: PostRepository,
{
    pub fn new(project_repo: P, post_repo: B, featured_limit: u32) -> Self {
        HomeHandler { project_repo, post_repo, featured_limit }
    }

    /// Top featured projects plus the site-wide counters. The post count only
    /// includes published posts.
    pub async fn summary(&self) -> Result<HomeSummary, AppError> {
        let featured_projects = self
            .project_repo
            .list_featured_projects(Some(self.featured_limit))
            .await?;
        let projects_count = self.project_repo.count_projects().await?;
        let posts_count = self.post_repo.count_posts(true).await?;

        Ok(HomeSummary { featured_projects, projects_count, posts_count })
    }
}
