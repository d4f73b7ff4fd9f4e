//! Inference transport abstraction
//!
//! A transport performs one synchronous call against an inference endpoint.
//! Implementations are allowed to block; [`crate::core::InferenceClient`]
//! always runs them on the blocking worker pool.

use crate::domain::{InferenceRequest, InferenceResponse, TransportError};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Blocking call to a remote model
pub trait InferenceTransport: Send + Sync {
    /// Send one request and wait for the completion
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when the call cannot be completed. No
    /// retry is performed at this layer.
    fn invoke_model(&self, request: &InferenceRequest) -> Result<InferenceResponse, TransportError>;

    /// Identifier of the model this transport calls, for logging
    fn model_id(&self) -> &str;
}

/// Transport that replays queued completions in order
///
/// Every request is recorded so tests can assert on prompts and call counts.
/// When the queue is empty the call fails with
/// [`TransportError::ConnectionFailed`].
///
/// # Example
///
/// ```
/// use piiguard::adapters::{InferenceTransport, ScriptedTransport};
/// use piiguard::domain::{DecodingParams, InferenceRequest};
///
/// let transport = ScriptedTransport::new(["True"]);
/// let request = InferenceRequest::new("prompt", DecodingParams::default());
/// assert_eq!(transport.invoke_model(&request).unwrap().completion, "True");
/// assert_eq!(transport.call_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<String, TransportError>>>,
    requests: Mutex<Vec<InferenceRequest>>,
}

impl ScriptedTransport {
    /// Queue successful completions
    pub fn new<I, S>(completions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let transport = Self::default();
        for completion in completions {
            transport.push_completion(completion);
        }
        transport
    }

    pub fn push_completion(&self, completion: impl Into<String>) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(Ok(completion.into()));
        }
    }

    pub fn push_error(&self, error: TransportError) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(Err(error));
        }
    }

    /// Number of calls made so far
    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }

    /// Copy of every request received, in order
    pub fn requests(&self) -> Vec<InferenceRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Completions still queued
    pub fn remaining(&self) -> usize {
        self.replies.lock().map(|r| r.len()).unwrap_or(0)
    }
}

impl InferenceTransport for ScriptedTransport {
    fn invoke_model(&self, request: &InferenceRequest) -> Result<InferenceResponse, TransportError> {
        self.requests
            .lock()
            .map_err(|e| TransportError::WorkerFailed(e.to_string()))?
            .push(request.clone());

        let reply = self
            .replies
            .lock()
            .map_err(|e| TransportError::WorkerFailed(e.to_string()))?
            .pop_front();

        match reply {
            Some(Ok(completion)) => Ok(InferenceResponse::new(completion)),
            Some(Err(e)) => Err(e),
            None => Err(TransportError::ConnectionFailed(
                "no scripted completion available".to_string(),
            )),
        }
    }

    fn model_id(&self) -> &str {
        "scripted"
    }
}
