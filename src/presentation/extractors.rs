use crate::application::directory::get_admin::GetAdminByEmailUseCase;
use crate::domain::admins::Admin;
use crate::infrastructure::state::AppState;
use crate::shared::error::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Authenticated admin extractor
///
/// Validates the bearer token, then requires its email to belong to an
/// `Admin` document.
pub struct AuthAdmin {
    pub admin: Admin,
}

impl FromRequestParts<AppState> for AuthAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Unauthorized("Invalid Authorization header format".to_string())
        })?;

        let claims = state
            .token_service
            .validate_token(token)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;

        if claims.token_type != "access" {
            return Err(AppError::Unauthorized("Invalid token type".to_string()));
        }

        let use_case = GetAdminByEmailUseCase::new(state.store.clone());
        match use_case.execute(claims.email()).await? {
            Some(admin) => Ok(AuthAdmin { admin }),
            None => {
                tracing::warn!(email = claims.email(), "Token holder is not an admin");
                Err(AppError::Forbidden("Insufficient permissions".to_string()))
            }
        }
    }
}
