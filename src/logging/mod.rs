//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels
//! - Console output on stderr (stdout belongs to the interactive session)
//! - Local JSON file logging with rotation
//!
//! Sentences and extracted values are never logged; events carry counts,
//! attempt numbers and latencies only.
//!
//! # Example
//!
//! ```no_run
//! use piiguard::logging::init_logging;
//! use piiguard::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use piiguard::log_error_with_context;
/// use piiguard::domain::GuardError;
///
/// let error = GuardError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use piiguard::log_retry_attempt;
/// use std::time::Duration;
///
/// log_retry_attempt!(2, 3, Duration::from_secs(1), "schema validation failed");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $delay:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            delay_ms = $delay.as_millis() as u64,
            reason = %$reason,
            "Retrying operation"
        );
    };
}

/// Log the result of inspecting one sentence
///
/// # Example
///
/// ```no_run
/// use piiguard::log_inspection_complete;
/// use std::time::Duration;
///
/// log_inspection_complete!(true, 2, Duration::from_millis(850));
/// ```
#[macro_export]
macro_rules! log_inspection_complete {
    ($contains_pii:expr, $fields_found:expr, $duration:expr) => {
        tracing::info!(
            contains_pii = $contains_pii,
            fields_found = $fields_found,
            duration_ms = $duration.as_millis() as u64,
            "Inspection completed"
        );
    };
}
