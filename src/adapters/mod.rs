//! External system integrations for piiguard.
//!
//! - [`transport`] - the blocking [`InferenceTransport`] seam and a scripted
//!   implementation for tests
//! - [`bedrock`] - AWS Bedrock runtime implementation
//!
//! # Design Pattern
//!
//! Adapters isolate the remote endpoint behind a trait so the classifier and
//! extractor can be exercised without network access:
//!
//! ```rust,no_run
//! use piiguard::adapters::bedrock::BedrockTransport;
//! use piiguard::config::{Credentials, GuardConfig};
//! use piiguard::core::InferenceClient;
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GuardConfig::default();
//! let transport = BedrockTransport::new(&config.inference, Credentials::from_env())?;
//! let client = InferenceClient::new(Arc::new(transport), &config.inference);
//! # Ok(())
//! # }
//! ```

pub mod bedrock;
pub mod transport;

pub use transport::{InferenceTransport, ScriptedTransport};
