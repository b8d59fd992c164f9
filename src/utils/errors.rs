//! Error handling for EventDesk
//! 
//! This module defines the main error type used throughout the application
//! and the four client-facing error categories it maps onto.

use std::fmt;
use serde::Serialize;
use thiserror::Error;

/// Main error type for EventDesk application
#[derive(Error, Debug)]
pub enum EventDeskError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    
    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// An unexpected failure inside a service operation, already logged
    #[error("{message}")]
    OperationFailed { message: String },
    
    #[error("Configuration error: {0}")]
    Config(String),
    
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    AlreadyExists(String),
    
    #[error("Authentication error: {0}")]
    Unauthorized(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),
    
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Password hashing error: {0}")]
    PasswordHash(String),
    
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for EventDesk operations
pub type Result<T> = std::result::Result<T, EventDeskError>;

/// Client-facing error category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    ValidationError,
    ResourceAlreadyExists,
    DatabaseError,
    Unauthorized,
    RateLimited,
}

impl ErrorCode {
    /// HTTP status code for this category
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorCode::NotFound => 404,
            ErrorCode::ValidationError => 400,
            ErrorCode::ResourceAlreadyExists => 409,
            ErrorCode::DatabaseError => 500,
            ErrorCode::Unauthorized => 401,
            ErrorCode::RateLimited => 429,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::ResourceAlreadyExists => "RESOURCE_ALREADY_EXISTS",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::RateLimited => "RATE_LIMITED",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl EventDeskError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::AlreadyExists(message.into())
    }

    pub fn operation_failed(message: impl Into<String>) -> Self {
        Self::OperationFailed { message: message.into() }
    }

    /// Category reported to API clients
    pub fn code(&self) -> ErrorCode {
        match self {
            EventDeskError::NotFound(_) => ErrorCode::NotFound,
            EventDeskError::Validation(_) => ErrorCode::ValidationError,
            EventDeskError::AlreadyExists(_) => ErrorCode::ResourceAlreadyExists,
            EventDeskError::Unauthorized(_)
            | EventDeskError::TokenExpired
            | EventDeskError::InvalidToken(_) => ErrorCode::Unauthorized,
            EventDeskError::RateLimitExceeded => ErrorCode::RateLimited,
            _ => ErrorCode::DatabaseError,
        }
    }

    /// Business-rule and auth outcomes, as opposed to infrastructure failures
    pub fn is_expected(&self) -> bool {
        self.code() != ErrorCode::DatabaseError
    }

    /// Message that is safe to show to API clients
    pub fn client_message(&self) -> String {
        match self {
            EventDeskError::Database(_)
            | EventDeskError::Migration(_)
            | EventDeskError::Io(_)
            | EventDeskError::Serialization(_)
            | EventDeskError::PasswordHash(_) => "An unexpected error occurred.".to_string(),
            other => other.to_string(),
        }
    }
    
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EventDeskError::Database(_) => ErrorSeverity::Critical,
            EventDeskError::Migration(_) => ErrorSeverity::Critical,
            EventDeskError::Config(_) => ErrorSeverity::Critical,
            EventDeskError::OperationFailed { .. } => ErrorSeverity::Error,
            EventDeskError::Unauthorized(_)
            | EventDeskError::TokenExpired
            | EventDeskError::InvalidToken(_)
            | EventDeskError::RateLimitExceeded => ErrorSeverity::Warning,
            EventDeskError::NotFound(_)
            | EventDeskError::Validation(_)
            | EventDeskError::AlreadyExists(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Collapses unexpected failures of a service operation into a single
/// database-error with an operation-specific message.
pub trait OperationResultExt<T> {
    fn or_operation_failed(self, message: &str) -> Result<T>;
}

impl<T> OperationResultExt<T> for Result<T> {
    fn or_operation_failed(self, message: &str) -> Result<T> {
        self.map_err(|e| {
            if e.is_expected() {
                e
            } else {
                tracing::error!(error = %e, operation = message, "Service operation failed");
                EventDeskError::operation_failed(message)
            }
        })
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
