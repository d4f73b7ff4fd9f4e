//! Bedrock text-completion wire models

use crate::domain::InferenceRequest;
use serde::{Deserialize, Serialize};

/// JSON body of an `InvokeModel` call for Anthropic text-completion models
#[derive(Debug, Serialize)]
pub struct CompletionBody<'a> {
    pub prompt: &'a str,
    pub max_tokens_to_sample: u32,
    pub temperature: f32,
    pub stop_sequences: &'a [String],
}

impl<'a> From<&'a InferenceRequest> for CompletionBody<'a> {
    fn from(request: &'a InferenceRequest) -> Self {
        Self {
            prompt: &request.prompt,
            max_tokens_to_sample: request.params.max_tokens,
            temperature: request.params.temperature,
            stop_sequences: &request.params.stop_sequences,
        }
    }
}

/// Successful `InvokeModel` response
#[derive(Debug, Deserialize)]
pub struct CompletionPayload {
    pub completion: String,

    #[serde(default)]
    pub stop_reason: Option<String>,
}

/// Error body returned with non-success statuses
#[derive(Debug, Deserialize)]
pub struct ErrorPayload {
    #[serde(alias = "Message")]
    pub message: String,
}
