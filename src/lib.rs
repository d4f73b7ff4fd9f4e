//! # piiguard - LLM-backed PII detection
//!
//! piiguard asks a hosted large language model two questions about a
//! sentence: does it contain personally identifiable information, and if so,
//! which values. The second answer is validated against a fixed record
//! schema and requested again, with a growing delay, when the model returns
//! something malformed.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and the interactive session
//! - [`core`] - Classifier, extractor and the orchestrating guard
//! - [`adapters`] - Inference transports (AWS Bedrock, scripted)
//! - [`domain`] - Records, requests and error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use piiguard::adapters::bedrock::BedrockTransport;
//! use piiguard::config::{load_config, Credentials};
//! use piiguard::core::PiiGuard;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("piiguard.toml")?;
//!     let transport = BedrockTransport::new(&config.inference, Credentials::from_env())?;
//!     let guard = PiiGuard::from_config(&config, Arc::new(transport));
//!
//!     let inspection = guard.inspect("My SSN is 123-45-6789").await?;
//!     if let Some(record) = inspection.extraction.as_ref().and_then(|o| o.record()) {
//!         println!("SSN: {:?}", record.social_security_number());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Failure model
//!
//! Transport failures (connection, authentication, service status, timeout)
//! are returned as [`domain::GuardError::Transport`] and are never retried.
//! Malformed extraction responses are retried inside the extractor and end
//! as [`domain::ExtractionOutcome::Exhausted`] when every attempt failed.
//!
//! ## Testing without a model
//!
//! [`adapters::ScriptedTransport`] replays queued completions:
//!
//! ```rust
//! use piiguard::adapters::ScriptedTransport;
//! use piiguard::config::GuardConfig;
//! use piiguard::core::PiiGuard;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let transport = Arc::new(ScriptedTransport::new(["False"]));
//! let guard = PiiGuard::from_config(&GuardConfig::default(), transport);
//! let inspection = guard.inspect("The weather is nice").await.unwrap();
//! assert!(!inspection.contains_pii);
//! # }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
