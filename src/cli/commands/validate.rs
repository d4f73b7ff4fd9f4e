//! Validate config command implementation
//!
//! This module implements the `validate-config` command. Loading already
//! validates, so a successful load prints a summary and a failed one the
//! reason.

use crate::config::{Credentials, GuardConfig};
use crate::domain::Result;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(
        &self,
        config_path: Option<&str>,
        config: Result<GuardConfig>,
    ) -> anyhow::Result<i32> {
        let source = config_path.unwrap_or("<defaults and environment>");
        tracing::info!(config_source = %source, "Validating configuration");

        println!("Validating configuration: {source}");
        println!();

        let config = match config {
            Ok(c) => c,
            Err(e) => {
                println!("Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("Configuration is valid");
        println!();
        print!("{}", Self::summary(&config));

        let missing = Credentials::from_env().missing();
        if !missing.is_empty() {
            println!();
            println!(
                "Warning: {} not set; model calls will fail to authenticate",
                missing.join(", ")
            );
        }
        println!();
        Ok(0)
    }

    fn summary(config: &GuardConfig) -> String {
        format!(
            "Configuration Summary:\n  \
             Log Level: {}\n  \
             Endpoint: {}\n  \
             Model: {}\n  \
             Max Tokens: {}\n  \
             Temperature: {}\n  \
             Timeout: {}s\n  \
             Max Concurrent Requests: {}\n  \
             Extraction Attempts: {}\n  \
             Backoff (s): {:?}\n  \
             File Logging: {}\n",
            config.application.log_level,
            config.inference.endpoint(),
            config.inference.model_id,
            config.inference.max_tokens,
            config.inference.temperature,
            config.inference.timeout_seconds,
            config.inference.max_concurrent_requests,
            config.extraction.max_attempts,
            config.extraction.backoff_seconds,
            if config.logging.local_enabled {
                config.logging.local_path.as_str()
            } else {
                "disabled"
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GuardError;

    #[test]
    fn test_summary_shows_resolved_endpoint() {
        let summary = ValidateArgs::summary(&GuardConfig::default());
        assert!(summary.contains("Endpoint: https://bedrock-runtime.us-east-1.amazonaws.com"));
        assert!(summary.contains("Model: anthropic.claude-v1"));
        assert!(summary.contains("Backoff (s): [1, 2, 3]"));
        assert!(summary.contains("File Logging: disabled"));
    }

    #[tokio::test]
    async fn test_invalid_config_exit_code() {
        let err = GuardError::Configuration("bad".to_string());
        let code = ValidateArgs {}.execute(Some("x.toml"), Err(err)).await.unwrap();
        assert_eq!(code, 2);
    }

    #[tokio::test]
    async fn test_valid_config_exit_code() {
        let code = ValidateArgs {}
            .execute(None, Ok(GuardConfig::default()))
            .await
            .unwrap();
        assert_eq!(code, 0);
    }
}
