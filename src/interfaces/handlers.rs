pub mod admin;
pub mod auth;
pub mod blog;
pub mod home;
pub mod projects;
pub mod system;

use actix_web::{http::header::ContentType, web, HttpResponse};
use tera::Context;

use crate::{errors::AppError, AppState};

/// Renders a page template with the site-wide variables filled in.
fn render_page(
    state: &web::Data<AppState>,
    template: &str,
    mut context: Context,
) -> Result<HttpResponse, AppError> {
    context.insert("site_name", &state.site_name);
    let body = state.templates.render(template, &context)?;

    Ok(HttpResponse::Ok()
        .insert_header(ContentType::html())
        .body(body))
}
