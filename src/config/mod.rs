//! Configuration management for piiguard.
//!
//! # Overview
//!
//! piiguard reads an optional TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for every setting
//! - `PIIGUARD_<SECTION>_<KEY>` environment overrides
//! - Validation on load
//!
//! AWS credentials never live in the file. They are read from
//! `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY` by [`Credentials::from_env`].
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [inference]
//! region = "us-east-1"
//! model_id = "anthropic.claude-v1"
//! max_tokens = 1000
//! temperature = 0.0
//!
//! [extraction]
//! max_attempts = 3
//! backoff_seconds = [1, 2, 3]
//!
//! [logging]
//! local_enabled = true
//! local_path = "logs"
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use piiguard::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("piiguard.toml")?;
//! println!("Model: {}", config.inference.model_id);
//! # Ok(())
//! # }
//! ```

pub mod credentials;
pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use credentials::Credentials;
pub use loader::{load_config, load_from_env};
pub use schema::{
    ApplicationConfig, ExtractionConfig, GuardConfig, InferenceConfig, LoggingConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
