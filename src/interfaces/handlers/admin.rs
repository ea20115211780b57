use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::{
        post::{MarkdownPreviewRequest, NewPostRequest, UpdatePostRequest},
        project::{NewProjectRequest, UpdateProjectRequest},
    },
    errors::AppError,
    use_cases::extractors::AdminClaims,
    AppState,
};

// ───── Posts ─────────────────────────────────────────────────────────

#[instrument(skip(_claims, state))]
pub async fn list_posts(
    _claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let posts = state.post_handler.list_all_posts().await?;
    Ok(HttpResponse::Ok().json(posts))
}

#[instrument(skip(_claims, state, data))]
pub async fn create_post(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<NewPostRequest>,
) -> Result<impl Responder, AppError> {
    let post = state.post_handler.create_post(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(post))
}

#[instrument(skip(_claims, post_id, state))]
pub async fn get_post(
    _claims: AdminClaims,
    post_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let post = state.post_handler.get_post_by_id(&post_id).await?;
    Ok(HttpResponse::Ok().json(post))
}

#[instrument(skip(_claims, post_id, state, data))]
pub async fn update_post(
    _claims: AdminClaims,
    post_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<UpdatePostRequest>,
) -> Result<impl Responder, AppError> {
    let updated_post = state.post_handler.update_post(&post_id, data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(updated_post))
}

#[instrument(skip(_claims, post_id, state))]
pub async fn delete_post(
    _claims: AdminClaims,
    post_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.post_handler.delete_post(&post_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[instrument(skip(_claims, state, data))]
pub async fn preview_markdown(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<MarkdownPreviewRequest>,
) -> Result<impl Responder, AppError> {
    let preview = state.post_handler.preview(&data.content);
    Ok(HttpResponse::Ok().json(preview))
}

// ───── Projects ──────────────────────────────────────────────────────

#[instrument(skip(_claims, state))]
pub async fn list_projects(
    _claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let projects = state.project_handler.list_all_projects().await?;
    Ok(HttpResponse::Ok().json(projects))
}

#[instrument(skip(_claims, state, data))]
pub async fn create_project(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<NewProjectRequest>,
) -> Result<impl Responder, AppError> {
    let project = state.project_handler.create_project(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(project))
}

#[instrument(skip(_claims, project_id, state))]
pub async fn get_project(
    _claims: AdminClaims,
    project_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let project = state.project_handler.get_project_by_id(&project_id).await?;
    Ok(HttpResponse::Ok().json(project))
}

#[instrument(skip(_claims, project_id, state, data))]
pub async fn update_project(
    _claims: AdminClaims,
    project_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<UpdateProjectRequest>,
) -> Result<impl Responder, AppError> {
    let updated = state
        .project_handler
        .update_project(&project_id, data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(updated))
}

#[instrument(skip(_claims, project_id, state))]
pub async fn delete_project(
    _claims: AdminClaims,
    project_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.project_handler.delete_project(&project_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
