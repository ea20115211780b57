use std::collections::HashMap;

use actix_web::{web, Responder};
use tera::Context;
use tracing::instrument;

use super::render_page;
use crate::{errors::AppError, AppState};

#[instrument(skip(state, query))]
pub async fn post_list(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> Result<impl Responder, AppError> {
    let page = state
        .post_handler
        .list_published_posts(query.get("page").map(String::as_str))
        .await?;

    let mut context = Context::new();
    context.insert("page", &page);

    render_page(&state, "blog/list.html", context)
}

#[instrument(skip(state))]
pub async fn post_detail(
    slug: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let detail = state.post_handler.get_published_post(&slug).await?;

    let mut context = Context::new();
    context.insert("post", &detail.post);
    context.insert("content_html", &detail.content_html);
    context.insert("tags", &detail.tags);

    render_page(&state, "blog/detail.html", context)
}
