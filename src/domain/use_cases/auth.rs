use validator::Validate;
use zeroize::Zeroizing;

use crate::auth::{jwt::JwtService, password::verify_password};
use crate::entities::token::{AdminLogin, AuthResponse, Claims};
use crate::errors::AuthError;
use crate::settings::AppConfig;

/// Authenticates the single site administrator configured in [`AppConfig`].
pub struct AdminAuthHandler {
    pub username: String,
    password_hash: Zeroizing<String>,
    pub token_service: JwtService,
}

impl AdminAuthHandler {
    pub fn new(config: &AppConfig) -> Self {
        AdminAuthHandler {
            username: config.admin_username.clone(),
            password_hash: Zeroizing::new(config.admin_password_hash.clone()),
            token_service: JwtService::new(config),
        }
    }

    /// Checks the credentials and issues an access token.
    pub fn login(&self, request: &AdminLogin) -> Result<AuthResponse, AuthError> {
        request.validate()?;

        let is_password_valid = verify_password(&request.password, &self.password_hash)
            .map_err(|e| {
                tracing::error!("Admin password hash could not be checked: {}", e);
                AuthError::WrongCredentials
            })?;

        if request.username != self.username || !is_password_valid {
            tracing::warn!(username = %request.username, "Rejected admin login");
            return Err(AuthError::WrongCredentials);
        }

        let access_token = self.token_service.create_jwt(&self.username)
            .map_err(|e| {
                tracing::warn!("Failed to create JWT: {}", e);
                AuthError::TokenCreation
            })?;

        tracing::info!("Admin logged in successfully");
        Ok(AuthResponse::new(access_token))
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        Ok(self.token_service.decode_jwt(token)?.claims)
    }
}
