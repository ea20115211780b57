use actix_web::{web, Responder};
use tera::Context;
use tracing::instrument;

use super::render_page;
use crate::{errors::AppError, AppState};

#[instrument(skip(state))]
pub async fn project_list(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let listing = state.project_handler.list_projects().await?;

    let mut context = Context::new();
    context.insert("projects", &listing.projects);
    context.insert("featured", &listing.featured);

    render_page(&state, "projects/list.html", context)
}

#[instrument(skip(state))]
pub async fn project_detail(
    slug: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let detail = state.project_handler.get_project(&slug).await?;

    let mut context = Context::new();
    context.insert("project", &detail.project);
    context.insert("technologies", &detail.technologies);

    render_page(&state, "projects/detail.html", context)
}
