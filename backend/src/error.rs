//! Error handling for the Cafe Merah Putih POS backend
//!
//! Provides consistent error responses in English and Indonesian

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_id: String,
    },

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Referential lookup failures
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Invalid user: {0}")]
    InvalidUser(String),

    // State errors
    #[error("Conflict: {message}")]
    Conflict {
        resource: String,
        message: String,
        message_id: String,
    },

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::Validation {
                field,
                message,
                message_id,
            } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message_en: message.clone(),
                    message_id: message_id.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::InvalidStatus(status) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "INVALID_STATUS".to_string(),
                    message_en: format!("Unknown status value: {}", status),
                    message_id: format!("Status tidak valid: {}", status),
                    field: Some("status".to_string()),
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message_en: format!("{} not found", resource),
                    message_id: format!("{} tidak ditemukan", resource),
                    field: None,
                },
            ),
            AppError::ProductNotFound(id) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "PRODUCT_NOT_FOUND".to_string(),
                    message_en: format!("Product {} does not exist in the catalog", id),
                    message_id: format!("Produk {} tidak ditemukan di katalog", id),
                    field: Some("produk_id".to_string()),
                },
            ),
            AppError::InvalidUser(id) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "INVALID_USER".to_string(),
                    message_en: format!("User {} is unknown or inactive", id),
                    message_id: format!("User {} tidak dikenal atau nonaktif", id),
                    field: Some("user_id".to_string()),
                },
            ),
            AppError::Conflict {
                resource,
                message,
                message_id,
            } => (
                StatusCode::CONFLICT,
                ErrorDetail {
                    code: "CONFLICT".to_string(),
                    message_en: message.clone(),
                    message_id: message_id.clone(),
                    field: Some(resource.clone()),
                },
            ),
            AppError::DatabaseError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "DATABASE_ERROR".to_string(),
                    message_en: "A database error occurred".to_string(),
                    message_id: "Terjadi kesalahan pada database".to_string(),
                    field: None,
                },
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message_en: msg.clone(),
                    message_id: "Terjadi kesalahan internal server".to_string(),
                    field: None,
                },
            ),
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message_en: "An internal server error occurred".to_string(),
                    message_id: "Terjadi kesalahan internal server".to_string(),
                    field: None,
                },
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
