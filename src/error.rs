// ABOUTME: Centralized error handling with field-keyed validation failures and store errors
// ABOUTME: Store errors are propagated unchanged and only classified when turned into responses

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::SqlErr;
use serde_json::json;
use std::fmt;

use crate::validation::ValidationErrors;

#[derive(Debug)]
pub enum AppError {
    Validation(ValidationErrors),
    Database(sea_orm::DbErr),
    NotFound(String),
    BadRequest(String),
    PasswordHash(String),
    Media(std::io::Error),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(errors) => write!(f, "Validation failed: {}", errors),
            AppError::Database(err) => write!(f, "Database error: {}", err),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::PasswordHash(msg) => write!(f, "Password hashing error: {}", msg),
            AppError::Media(err) => write!(f, "Media storage error: {}", err),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Validation(errors) => {
                tracing::info!("Validation failed: {}", errors);
                return (StatusCode::BAD_REQUEST, Json(errors)).into_response();
            }
            AppError::Database(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(detail)) => {
                    tracing::warn!("Unique constraint violated: {}", detail);
                    (StatusCode::CONFLICT, "Record already exists")
                }
                Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                    tracing::warn!("Foreign key constraint violated: {}", detail);
                    (StatusCode::BAD_REQUEST, "Referenced record does not exist")
                }
                _ => {
                    tracing::error!("Database error: {}", self);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Database operation failed",
                    )
                }
            },
            AppError::NotFound(msg) => {
                tracing::info!("Resource not found: {}", msg);
                (StatusCode::NOT_FOUND, "Resource not found")
            }
            AppError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg.as_str())
            }
            AppError::PasswordHash(_) => {
                tracing::error!("Password hashing error: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            AppError::Media(_) => {
                tracing::error!("Media storage error: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "File storage failed")
            }
            AppError::Internal(_) => {
                tracing::error!("Internal error: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

// Conversion implementations
impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::Database(err)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Media(err)
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        AppError::BadRequest(format!("Invalid multipart body: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
