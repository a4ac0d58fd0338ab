use std::fmt;
use thiserror::Error;

/// The base error type for all Appointly errors.
///
/// Every crate in the workspace reports failures through this enum so the
/// front end can map them to one user-facing message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppointlyError {
    /// Error occurred while sending an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Admin token missing, rejected or expired
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred due to a conflict (e.g. the time slot is already taken)
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// The backend answered with an unexpected status
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppointlyError {
    /// The message without the variant prefix, suitable for showing to a user.
    pub fn user_message(&self) -> String {
        match self {
            AppointlyError::HttpError(m)
            | AppointlyError::ParseError(m)
            | AppointlyError::ConfigError(m)
            | AppointlyError::AuthError(m)
            | AppointlyError::ValidationError(m)
            | AppointlyError::ConflictError(m)
            | AppointlyError::NotFoundError(m)
            | AppointlyError::InternalError(m) => m.clone(),
            AppointlyError::ApiError { message, .. } => message.clone(),
        }
    }
}

// Common error conversions
impl From<reqwest::Error> for AppointlyError {
    fn from(err: reqwest::Error) -> Self {
        AppointlyError::HttpError(format!("Network error: {}", err))
    }
}

impl From<serde_json::Error> for AppointlyError {
    fn from(err: serde_json::Error) -> Self {
        AppointlyError::ParseError(err.to_string())
    }
}

impl From<config::ConfigError> for AppointlyError {
    fn from(err: config::ConfigError) -> Self {
        AppointlyError::ConfigError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> AppointlyError {
    AppointlyError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> AppointlyError {
    AppointlyError::ValidationError(message.to_string())
}

pub fn auth_error<T: fmt::Display>(message: T) -> AppointlyError {
    AppointlyError::AuthError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> AppointlyError {
    AppointlyError::NotFoundError(message.to_string())
}

pub fn conflict<T: fmt::Display>(message: T) -> AppointlyError {
    AppointlyError::ConflictError(message.to_string())
}
