//! Domain models and types for piiguard.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Extraction results** ([`PiiRecord`], [`ExtractionOutcome`])
//! - **Inference call types** ([`InferenceRequest`], [`InferenceResponse`], [`DecodingParams`])
//! - **Error types** ([`GuardError`], [`TransportError`], [`SchemaError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! Fallible operations return [`Result<T, GuardError>`]. Schema failures are
//! the exception: they are absorbed by the extractor and only show up as
//! [`ExtractionOutcome::Exhausted`].
//!
//! ```rust
//! use piiguard::domain::{ExtractionOutcome, PiiRecord};
//!
//! let outcome = ExtractionOutcome::Extracted {
//!     record: PiiRecord::from_response(r#"{"name": "Ada Lovelace"}"#).unwrap(),
//!     attempt: 1,
//! };
//! assert_eq!(outcome.record().and_then(|r| r.name()), Some("Ada Lovelace"));
//! ```

pub mod errors;
pub mod inference;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{GuardError, SchemaError, TransportError};
pub use inference::{
    DecodingParams, InferenceRequest, InferenceResponse, ASSISTANT_TURN_MARKER,
    HUMAN_TURN_MARKER,
};
pub use record::{ExtractionOutcome, PiiRecord, RECORD_FIELDS};
pub use result::Result;
