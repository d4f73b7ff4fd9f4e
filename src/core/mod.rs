//! Core PII detection pipeline
//!
//! - [`inference`] - async bridge over the blocking transport
//! - [`classifier`] - True/False PII verdict
//! - [`extractor`] - schema-validated extraction with linear backoff
//! - [`guard`] - classify-then-extract orchestration
//! - [`prompts`] - prompt templates

pub mod classifier;
pub mod extractor;
pub mod guard;
pub mod inference;
pub mod prompts;

pub use classifier::{interpret_verdict, PiiClassifier};
pub use extractor::PiiExtractor;
pub use guard::{Inspection, PiiGuard};
pub use inference::InferenceClient;
