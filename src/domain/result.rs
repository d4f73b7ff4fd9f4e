//! Result type alias for piiguard
//!
//! This module provides a convenient Result type alias that uses GuardError
//! as the error type.

use super::errors::GuardError;

/// Result type alias for piiguard operations
///
/// # Examples
///
/// ```
/// use piiguard::domain::result::Result;
/// use piiguard::domain::errors::GuardError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(GuardError::Configuration("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, GuardError>;
