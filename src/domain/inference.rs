//! Inference request and response types
//!
//! Both are scoped to a single call against the inference endpoint.

use serde::{Deserialize, Serialize};

/// Fixed decoding parameters applied to every request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodingParams {
    /// Upper bound on generated tokens
    pub max_tokens: u32,

    /// Sampling temperature (0.0 is fully deterministic)
    pub temperature: f32,

    /// Generation halts when one of these markers is produced
    pub stop_sequences: Vec<String>,
}

impl Default for DecodingParams {
    fn default() -> Self {
        Self {
            max_tokens: 1000,
            temperature: 0.0,
            stop_sequences: vec![HUMAN_TURN_MARKER.to_string()],
        }
    }
}

/// Turn boundary that starts the next human message
pub const HUMAN_TURN_MARKER: &str = "\n\nHuman:";

/// Marker after which the model writes its answer
pub const ASSISTANT_TURN_MARKER: &str = "\n\nAssistant:";

/// One request to the inference endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceRequest {
    pub prompt: String,
    pub params: DecodingParams,
}

impl InferenceRequest {
    pub fn new(prompt: impl Into<String>, params: DecodingParams) -> Self {
        Self {
            prompt: prompt.into(),
            params,
        }
    }
}

/// Raw completion text returned by the endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceResponse {
    pub completion: String,
}

impl InferenceResponse {
    pub fn new(completion: impl Into<String>) -> Self {
        Self {
            completion: completion.into(),
        }
    }
}
