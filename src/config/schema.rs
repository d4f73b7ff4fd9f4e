//! Configuration schema types
//!
//! This module defines the configuration structure for piiguard.

use crate::domain::DecodingParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main piiguard configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Every section is optional in the file and falls back to its defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuardConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Inference endpoint settings
    #[serde(default)]
    pub inference: InferenceConfig,

    /// Extraction retry settings
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GuardConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.inference.validate()?;
        self.extraction.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Inference endpoint configuration
///
/// Credentials are not part of the file; they come from the process
/// environment (see [`crate::config::Credentials`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// AWS region hosting the model
    #[serde(default = "default_region")]
    pub region: String,

    /// Endpoint override; defaults to the regional Bedrock runtime endpoint
    #[serde(default)]
    pub endpoint_url: Option<String>,

    /// Model identifier
    #[serde(default = "default_model_id")]
    pub model_id: String,

    /// Maximum tokens to sample per completion
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature
    #[serde(default)]
    pub temperature: f32,

    /// Stop sequences ending the completion
    #[serde(default = "default_stop_sequences")]
    pub stop_sequences: Vec<String>,

    /// HTTP timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Maximum number of transport calls running on the worker pool at once
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,
}

impl InferenceConfig {
    /// Resolved endpoint URL
    pub fn endpoint(&self) -> String {
        match &self.endpoint_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://bedrock-runtime.{}.amazonaws.com", self.region),
        }
    }

    /// Decoding parameters sent with every request
    pub fn decoding_params(&self) -> DecodingParams {
        DecodingParams {
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            stop_sequences: self.stop_sequences.clone(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn validate(&self) -> Result<(), String> {
        if self.region.trim().is_empty() {
            return Err("inference.region cannot be empty".to_string());
        }

        let endpoint = self.endpoint();
        let parsed = url::Url::parse(&endpoint)
            .map_err(|e| format!("inference.endpoint_url '{endpoint}' is not a valid URL: {e}"))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err("inference.endpoint_url must start with http:// or https://".to_string());
        }
        if parsed.host_str().is_none() {
            return Err(format!("inference.endpoint_url '{endpoint}' has no host"));
        }

        if self.model_id.trim().is_empty() {
            return Err("inference.model_id cannot be empty".to_string());
        }

        if self.max_tokens == 0 {
            return Err("inference.max_tokens must be > 0".to_string());
        }

        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(format!(
                "inference.temperature must be between 0.0 and 1.0, got {}",
                self.temperature
            ));
        }

        if self.stop_sequences.is_empty() {
            return Err("inference.stop_sequences must contain at least one marker".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("inference.timeout_seconds must be > 0".to_string());
        }

        if self.max_concurrent_requests == 0 || self.max_concurrent_requests > 64 {
            return Err(format!(
                "inference.max_concurrent_requests must be between 1 and 64, got {}",
                self.max_concurrent_requests
            ));
        }

        Ok(())
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            endpoint_url: None,
            model_id: default_model_id(),
            max_tokens: default_max_tokens(),
            temperature: 0.0,
            stop_sequences: default_stop_sequences(),
            timeout_seconds: default_timeout_seconds(),
            max_concurrent_requests: default_max_concurrent_requests(),
        }
    }
}

/// Extraction retry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Attempts before extraction is reported as exhausted
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,

    /// Delay in seconds before attempt `n + 2`, indexed by `n`
    #[serde(default = "default_backoff_seconds")]
    pub backoff_seconds: Vec<u64>,
}

impl ExtractionConfig {
    /// Delay table as durations
    pub fn backoff_schedule(&self) -> Vec<Duration> {
        self.backoff_seconds
            .iter()
            .map(|s| Duration::from_secs(*s))
            .collect()
    }

    fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("extraction.max_attempts must be >= 1".to_string());
        }

        if self.backoff_seconds.len() < self.max_attempts - 1 {
            return Err(format!(
                "extraction.backoff_seconds needs at least {} entries for {} attempts, got {}",
                self.max_attempts - 1,
                self.max_attempts,
                self.backoff_seconds.len()
            ));
        }

        Ok(())
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_seconds: default_backoff_seconds(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled = true".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "warn".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_model_id() -> String {
    "anthropic.claude-v1".to_string()
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_stop_sequences() -> Vec<String> {
    vec![crate::domain::HUMAN_TURN_MARKER.to_string()]
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_max_concurrent_requests() -> usize {
    4
}

fn default_max_attempts() -> usize {
    3
}

fn default_backoff_seconds() -> Vec<u64> {
    vec![1, 2, 3]
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GuardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.inference.max_tokens, 1000);
        assert_eq!(config.inference.temperature, 0.0);
        assert_eq!(config.extraction.max_attempts, 3);
        assert_eq!(config.extraction.backoff_seconds, vec![1, 2, 3]);
    }

    #[test]
    fn test_default_endpoint_follows_region() {
        let config = InferenceConfig {
            region: "eu-west-1".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.endpoint(),
            "https://bedrock-runtime.eu-west-1.amazonaws.com"
        );
    }

    #[test]
    fn test_endpoint_override_trims_slash() {
        let config = InferenceConfig {
            endpoint_url: Some("http://localhost:4566/".to_string()),
            ..Default::default()
        };
        assert_eq!(config.endpoint(), "http://localhost:4566");
    }

    #[test]
    fn test_decoding_params_from_config() {
        let params = InferenceConfig::default().decoding_params();
        assert_eq!(params, DecodingParams::default());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = GuardConfig::default();
        config.application.log_level = "verbose".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.contains("Invalid log_level"));
    }

    #[test]
    fn test_invalid_endpoint_scheme() {
        let mut config = GuardConfig::default();
        config.inference.endpoint_url = Some("ftp://example.com".to_string());
        assert!(config.validate().is_err());

        config.inference.endpoint_url = Some("not a url".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_model_id_rejected() {
        let mut config = GuardConfig::default();
        config.inference.model_id = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_temperature_range() {
        let mut config = GuardConfig::default();
        config.inference.temperature = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_concurrency_bounds() {
        let mut config = GuardConfig::default();
        config.inference.max_concurrent_requests = 0;
        assert!(config.validate().is_err());
        config.inference.max_concurrent_requests = 65;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_backoff_table_must_cover_attempts() {
        let mut config = GuardConfig::default();
        config.extraction.max_attempts = 5;
        let err = config.validate().unwrap_err();
        assert!(err.contains("backoff_seconds"));

        config.extraction.max_attempts = 1;
        config.extraction.backoff_seconds = vec![];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let mut config = GuardConfig::default();
        config.extraction.max_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_backoff_schedule_durations() {
        let schedule = ExtractionConfig::default().backoff_schedule();
        assert_eq!(
            schedule,
            vec![
                Duration::from_secs(1),
                Duration::from_secs(2),
                Duration::from_secs(3)
            ]
        );
    }

    #[test]
    fn test_invalid_rotation() {
        let mut config = GuardConfig::default();
        config.logging.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());
    }
}
