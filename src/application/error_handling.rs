// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps internal errors → view-friendly responses
// - Provides consistent error format for the view layer
// - Never exposes internal implementation details
// - Logs errors for debugging

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Standard error response for the view layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Invalid input
    Validation,

    /// Domain invariant violation
    DomainError,

    /// Local storage failure
    Storage,

    /// Movie metadata provider failure
    ExternalService,

    /// Missing or invalid configuration
    Configuration,

    /// Other/unknown error
    Internal,
}

impl ErrorResponse {
    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::Domain(domain_error) => Self {
                success: false,
                error_type: ErrorType::DomainError,
                message: "Domain validation failed".to_string(),
                details: Some(domain_error.to_string()),
            },

            // Already a user-facing message; the cause was logged where it happened
            AppError::Gateway(message) => Self {
                success: false,
                error_type: ErrorType::ExternalService,
                message,
                details: None,
            },

            AppError::Config(message) => Self {
                success: false,
                error_type: ErrorType::Configuration,
                message: "Application is not configured".to_string(),
                details: Some(message),
            },

            AppError::Database(db_error) => {
                log::error!("Database error: {:?}", db_error);

                Self {
                    success: false,
                    error_type: ErrorType::Storage,
                    message: "Database operation failed".to_string(),
                    details: Some("Check logs for details".to_string()),
                }
            }

            AppError::Pool(pool_error) => {
                log::error!("Connection pool error: {}", pool_error);

                Self {
                    success: false,
                    error_type: ErrorType::Storage,
                    message: "Database connection failed".to_string(),
                    details: None,
                }
            }

            AppError::Io(io_error) => {
                log::error!("IO error: {:?}", io_error);

                Self {
                    success: false,
                    error_type: ErrorType::Storage,
                    message: "File system operation failed".to_string(),
                    details: Some(io_error.to_string()),
                }
            }

            AppError::Serialization(serde_error) => {
                log::error!("Serialization error: {:?}", serde_error);

                Self {
                    success: false,
                    error_type: ErrorType::Internal,
                    message: "Data serialization failed".to_string(),
                    details: None,
                }
            }

            AppError::Other(message) => {
                log::error!("Other error: {}", message);

                Self {
                    success: false,
                    error_type: ErrorType::Internal,
                    message,
                    details: None,
                }
            }
        }
    }

    /// Create validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_type: ErrorType::Validation,
            message: message.into(),
            details: None,
        }
    }

    /// Serialized form handed back to the view
    pub fn into_json(self) -> String {
        serde_json::to_string(&self).unwrap_or_else(|_| self.message)
    }
}

/// Helper trait to convert Results to ErrorResponse
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> Result<T, String>;
}

impl<T> ToErrorResponse<T> for Result<T, AppError> {
    fn to_error_response(self) -> Result<T, String> {
        self.map_err(|e| ErrorResponse::from_app_error(e).into_json())
    }
}
