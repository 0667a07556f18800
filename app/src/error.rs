//! Error handling for the Avicola Admin dashboard
//!
//! Every rejected submission maps to an [`ErrorDetail`] the dashboard shows
//! as a blocking alert.

use serde::Serialize;
use shared::InputError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Invalid input for {field}: {source}")]
    InvalidInput {
        field: String,
        #[source]
        source: InputError,
    },

    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    // Catalog integrity errors
    #[error("Still in use: {0}")]
    InUse(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error")]
    InternalError(#[from] anyhow::Error),
}

impl AppError {
    /// Wrap a `&'static str` rule failure from the shared validators
    pub fn validation(field: &str, message: &str) -> Self {
        AppError::Validation {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    pub fn invalid_input(field: &str, source: InputError) -> Self {
        AppError::InvalidInput {
            field: field.to_string(),
            source,
        }
    }

    /// Field the error refers to, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            AppError::Validation { field, .. } | AppError::InvalidInput { field, .. } => {
                Some(field)
            }
            _ => None,
        }
    }

    /// Shape rendered by the dashboard alert
    pub fn detail(&self) -> ErrorDetail {
        let (code, message) = match self {
            AppError::Validation { message, .. } => ("VALIDATION_ERROR", message.clone()),
            AppError::InvalidInput { source, .. } => ("INVALID_INPUT", source.to_string()),
            AppError::DuplicateEntry(what) => (
                "DUPLICATE_ENTRY",
                format!("A {} with this name already exists", what),
            ),
            AppError::InUse(what) => (
                "IN_USE",
                format!("{} is still referenced and cannot be deleted", what),
            ),
            AppError::NotFound(resource) => ("NOT_FOUND", format!("{} not found", resource)),
            AppError::Configuration(e) => ("CONFIGURATION_ERROR", format!("Configuration error: {}", e)),
            AppError::Internal(msg) => ("INTERNAL_ERROR", msg.clone()),
            AppError::InternalError(_) => (
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            ),
        };

        if matches!(self, AppError::Internal(_) | AppError::InternalError(_)) {
            tracing::error!("Error: {:?}", self);
        }

        ErrorDetail {
            code: code.to_string(),
            message,
            field: self.field().map(str::to_string),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let mut fields: Vec<_> = field_errors.iter().collect();
        fields.sort_by_key(|(field, _)| **field);

        match fields.first() {
            Some((field, errs)) => {
                let message = errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                AppError::validation(field, &message)
            }
            None => AppError::validation("form", "Form is invalid"),
        }
    }
}

/// Error shown to the user
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Result type alias for services
pub type AppResult<T> = Result<T, AppError>;
