//! Domain error types
//!
//! This module defines the error hierarchy for piiguard. All errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main piiguard error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum GuardError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Remote inference call could not be completed
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Errors raised when a call to the inference endpoint cannot complete
///
/// None of these are retried by the classifier or the extractor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Failed to reach the endpoint
    #[error("Failed to connect to inference endpoint: {0}")]
    ConnectionFailed(String),

    /// Missing or rejected credentials
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Endpoint answered with a non-success status
    #[error("Service error: {status} - {message}")]
    ServiceError { status: u16, message: String },

    /// Response body could not be decoded
    #[error("Invalid response from endpoint: {0}")]
    InvalidResponse(String),

    /// Request timed out in the HTTP transport
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// The worker running the blocking call panicked or was cancelled
    #[error("Inference worker failed: {0}")]
    WorkerFailed(String),
}

/// A model response that does not satisfy the PII record schema
///
/// Only ever observed inside the extractor's retry loop.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Response text is not parseable JSON
    #[error("response is not valid JSON: {0}")]
    MalformedJson(String),

    /// Top-level JSON value is not an object
    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),

    /// A known field carries a value that is neither a string nor null
    #[error("field '{field}' must be a string or null, found {found}")]
    InvalidField { field: String, found: &'static str },
}

// Conversion from std::io::Error
impl From<std::io::Error> for GuardError {
    fn from(err: std::io::Error) -> Self {
        GuardError::Io(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for GuardError {
    fn from(err: toml::de::Error) -> Self {
        GuardError::Configuration(format!("TOML parse error: {err}"))
    }
}
