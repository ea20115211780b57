use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, middlewares, repositories, routes};
pub use infrastructure::{auth, db, templates, utils};

use errors::AppError;
use repositories::{
    post::PostRepository,
    project::ProjectRepository,
    sqlx_repo::{SqlxPostRepo, SqlxProjectRepo},
};
use templates::TemplateRenderer;
use use_cases::{
    auth::AdminAuthHandler, blog::PostHandler, home::HomeHandler, projects::ProjectHandler,
};
use utils::markdown::MarkdownRenderer;

pub type AppPostHandler = PostHandler<Arc<dyn PostRepository>>;
pub type AppProjectHandler = ProjectHandler<Arc<dyn ProjectRepository>>;
pub type AppHomeHandler = HomeHandler<Arc<dyn ProjectRepository>, Arc<dyn PostRepository>>;

pub struct AppState {
    pub post_handler: AppPostHandler,
    pub project_handler: AppProjectHandler,
    pub home_handler: AppHomeHandler,
    pub auth_handler: AdminAuthHandler,
    pub templates: TemplateRenderer,
    pub site_name: String,
}

impl AppState {
    /// Wires the use cases over any store implementation.
    pub fn new(
        config: &settings::AppConfig,
        post_repo: Arc<dyn PostRepository>,
        project_repo: Arc<dyn ProjectRepository>,
    ) -> Result<Self, AppError> {
        let renderer = MarkdownRenderer::new(&config.code_theme);
        let templates = TemplateRenderer::new()?;

        Ok(AppState {
            post_handler: PostHandler::new(post_repo.clone(), renderer, config.posts_per_page),
            project_handler: ProjectHandler::new(project_repo.clone()),
            home_handler: HomeHandler::new(project_repo, post_repo, config.featured_projects_limit),
            auth_handler: AdminAuthHandler::new(config),
            templates,
            site_name: config.name.clone(),
        })
    }

    /// State backed by the Postgres store.
    pub fn postgres(config: &settings::AppConfig, pool: sqlx::PgPool) -> Result<Self, AppError> {
        Self::new(
            config,
            Arc::new(SqlxPostRepo::new(pool.clone())),
            Arc::new(SqlxProjectRepo::new(pool)),
        )
    }
}
