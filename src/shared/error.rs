use crate::application::drivers::provision::ProvisioningError;
use crate::domain::documents::StoreError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    /// An authentication or document store call failed. Carries the provider
    /// message as-is.
    #[error("{0}")]
    ProviderError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Internal server error: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

/// JSON:API error object
#[derive(Serialize, ToSchema)]
pub struct JsonApiError {
    pub status: u16,
    pub detail: String,
}

/// JSON:API error document
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub errors: Vec<JsonApiError>,
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Unavailable(msg) => AppError::ProviderError(msg),
            other => AppError::InternalServerError(anyhow::Error::new(other)),
        }
    }
}

impl From<ProvisioningError> for AppError {
    fn from(e: ProvisioningError) -> Self {
        match e {
            ProvisioningError::MissingFields => AppError::ValidationError(e.to_string()),
            ProvisioningError::Declined | ProvisioningError::FormClosed => {
                AppError::Conflict(e.to_string())
            }
            ProvisioningError::Auth(e) => AppError::ProviderError(e.to_string()),
            ProvisioningError::Store(e) => AppError::from(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::ValidationError(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::ProviderError(msg) => {
                tracing::error!("Provider error: {}", msg);
                (StatusCode::BAD_GATEWAY, msg)
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::InternalServerError(e) => {
                tracing::error!("Internal server error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            errors: vec![JsonApiError {
                status: status.as_u16(),
                detail: message,
            }],
        };

        (status, Json(body)).into_response()
    }
}
