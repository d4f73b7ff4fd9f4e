//! AWS Bedrock adapter
//!
//! Provides the [`BedrockTransport`], its wire models and SigV4 signing.

pub mod client;
pub mod models;
pub mod signing;

pub use client::BedrockTransport;
pub use models::{CompletionBody, CompletionPayload};
