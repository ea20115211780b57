use actix_web::{get, web, Responder};
use tera::Context;
use tracing::instrument;

use super::render_page;
use crate::{errors::AppError, AppState};

#[get("/")]
#[instrument(skip(state))]
pub async fn home(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let summary = state.home_handler.summary().await?;

    let mut context = Context::new();
    context.insert("featured_projects", &summary.featured_projects);
    context.insert("projects_count", &summary.projects_count);
    context.insert("posts_count", &summary.posts_count);

    render_page(&state, "index.html", context)
}
