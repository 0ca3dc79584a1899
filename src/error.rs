//! Error types for the SEO audit engine.
//!
//! This module provides structured error handling with:
//! - `AppError`: Domain-specific errors for file I/O, dataset parsing, configuration and
//!   the text generation service
//! - `Result<T>`: Type alias for Results using AppError
//!
//! The audit and scoring core never produces these errors; it is total over
//! its inputs. Errors only originate at the I/O and service edges.

use serde::Serialize;
use thiserror::Error;

// ============================================================================
// DOMAIN ERROR TYPE
// ============================================================================

/// Domain-specific errors for application operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Dataset, settings or report file could not be read or written
    #[error("I/O error ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Page dataset is not a JSON array of page records
    #[error("Dataset parse error: {0}")]
    DatasetParse(#[from] serde_json::Error),

    /// No page with the requested identifier or name
    #[error("Page not found: {0}")]
    PageNotFound(String),

    /// Settings are missing or malformed
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// External service error (Gemini, keyword model, etc.)
    #[error("Service error ({service}): {message}")]
    ServiceError { service: &'static str, message: String },

    /// Generic error with context
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Create an I/O error for `path`
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a service error
    pub fn service(service: &'static str, msg: impl Into<String>) -> Self {
        Self::ServiceError {
            service,
            message: msg.into(),
        }
    }

    /// Create a settings error
    pub fn settings(msg: impl Into<String>) -> Self {
        Self::InvalidSettings(msg.into())
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;

// ============================================================================
// SERIALIZABLE ERROR (FOR REPORT CONSUMERS)
// ============================================================================

/// Flattened error message suitable for embedding in a JSON report.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorMessage(pub String);

impl From<&AppError> for ErrorMessage {
    fn from(error: &AppError) -> Self {
        match error {
            AppError::Other(inner) => Self(format!("{:#}", inner)),
            other => Self(other.to_string()),
        }
    }
}

impl From<&anyhow::Error> for ErrorMessage {
    fn from(error: &anyhow::Error) -> Self {
        Self(format!("{:#}", error))
    }
}
