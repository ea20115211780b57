use actix_web::{post, web, HttpResponse};
use tracing::instrument;

use crate::{entities::token::AdminLogin, errors::AuthError, AppState};

#[post("/login")]
#[instrument(skip(state, credentials))]
pub async fn login(
    state: web::Data<AppState>,
    credentials: web::Json<AdminLogin>,
) -> Result<HttpResponse, AuthError> {
    let auth_response = state.auth_handler.login(&credentials)?;
    Ok(HttpResponse::Ok().json(auth_response))
}
