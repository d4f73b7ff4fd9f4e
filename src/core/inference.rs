//! Inference client
//!
//! Bridges the blocking [`InferenceTransport`] into async callers. Each call
//! acquires a permit from a semaphore shared by every clone of the client,
//! then runs the transport on tokio's blocking pool while the calling task is
//! suspended. The permit moves into the worker and is dropped when the worker
//! finishes, whether the call succeeded, failed or panicked.

use crate::adapters::InferenceTransport;
use crate::config::InferenceConfig;
use crate::domain::{DecodingParams, InferenceRequest, TransportError};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;

/// Async handle for single-shot model calls
///
/// Cloning is cheap; clones share the transport and the worker permits.
#[derive(Clone)]
pub struct InferenceClient {
    transport: Arc<dyn InferenceTransport>,
    params: DecodingParams,
    permits: Arc<Semaphore>,
}

impl InferenceClient {
    /// Create a client from inference configuration
    pub fn new(transport: Arc<dyn InferenceTransport>, config: &InferenceConfig) -> Self {
        Self::with_params(
            transport,
            config.decoding_params(),
            config.max_concurrent_requests,
        )
    }

    /// Create a client with explicit decoding parameters and worker bound
    ///
    /// A bound of zero is treated as one.
    pub fn with_params(
        transport: Arc<dyn InferenceTransport>,
        params: DecodingParams,
        max_concurrent_requests: usize,
    ) -> Self {
        Self {
            transport,
            params,
            permits: Arc::new(Semaphore::new(max_concurrent_requests.max(1))),
        }
    }

    /// Model identifier reported by the transport
    pub fn model_id(&self) -> &str {
        self.transport.model_id()
    }

    /// Workers currently free
    pub fn available_workers(&self) -> usize {
        self.permits.available_permits()
    }

    /// Send `prompt` to the model and return the raw completion text
    ///
    /// Exactly one transport call is made. Nothing is retried here.
    ///
    /// # Errors
    ///
    /// Returns the transport's error, or [`TransportError::WorkerFailed`] if
    /// the worker panicked or the pool is shut down.
    pub async fn invoke(&self, prompt: &str) -> Result<String, TransportError> {
        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|e| TransportError::WorkerFailed(e.to_string()))?;

        let transport = Arc::clone(&self.transport);
        let request = InferenceRequest::new(prompt, self.params.clone());
        let started = Instant::now();

        let joined = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            transport.invoke_model(&request)
        })
        .await;

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match joined {
            Ok(Ok(response)) => {
                tracing::debug!(
                    model_id = %self.model_id(),
                    elapsed_ms,
                    "Inference call completed"
                );
                Ok(response.completion)
            }
            // reported at error level by the caller
            Ok(Err(e)) => {
                tracing::debug!(
                    model_id = %self.model_id(),
                    elapsed_ms,
                    error = %e,
                    "Inference call failed"
                );
                Err(e)
            }
            Err(join_error) => Err(TransportError::WorkerFailed(join_error.to_string())),
        }
    }
}

impl std::fmt::Debug for InferenceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceClient")
            .field("model_id", &self.model_id())
            .field("params", &self.params)
            .field("available_workers", &self.available_workers())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ScriptedTransport;
    use crate::domain::{InferenceResponse, TransportError};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Blocks for a while and records the peak number of concurrent calls
    #[derive(Default)]
    struct SlowTransport {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    impl InferenceTransport for SlowTransport {
        fn invoke_model(
            &self,
            _request: &InferenceRequest,
        ) -> Result<InferenceResponse, TransportError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(30));
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(InferenceResponse::new("ok"))
        }

        fn model_id(&self) -> &str {
            "slow"
        }
    }

    struct PanickingTransport;

    impl InferenceTransport for PanickingTransport {
        fn invoke_model(
            &self,
            _request: &InferenceRequest,
        ) -> Result<InferenceResponse, TransportError> {
            panic!("transport exploded");
        }

        fn model_id(&self) -> &str {
            "panicking"
        }
    }

    #[tokio::test]
    async fn test_invoke_sends_prompt_with_fixed_params() {
        let transport = Arc::new(ScriptedTransport::new(["completion text"]));
        let client = InferenceClient::new(transport.clone(), &InferenceConfig::default());

        let completion = client.invoke("hello").await.unwrap();
        assert_eq!(completion, "completion text");

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].prompt, "hello");
        assert_eq!(requests[0].params.max_tokens, 1000);
        assert_eq!(requests[0].params.temperature, 0.0);
        assert_eq!(requests[0].params.stop_sequences, vec!["\n\nHuman:".to_string()]);
    }

    #[tokio::test]
    async fn test_transport_error_propagates_without_retry() {
        let transport = Arc::new(ScriptedTransport::default());
        transport.push_error(TransportError::AuthenticationFailed("denied".to_string()));
        transport.push_completion("never reached");
        let client = InferenceClient::new(transport.clone(), &InferenceConfig::default());

        let err = client.invoke("hello").await.unwrap_err();
        assert!(matches!(err, TransportError::AuthenticationFailed(_)));
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_permit_released_after_failure() {
        let transport = Arc::new(ScriptedTransport::default());
        transport.push_error(TransportError::ConnectionFailed("down".to_string()));
        transport.push_completion("recovered");
        let client =
            InferenceClient::with_params(transport, DecodingParams::default(), 1);

        assert!(client.invoke("a").await.is_err());
        assert_eq!(client.available_workers(), 1);
        assert_eq!(client.invoke("b").await.unwrap(), "recovered");
    }

    #[tokio::test]
    async fn test_worker_panic_becomes_worker_failed() {
        let client = InferenceClient::with_params(
            Arc::new(PanickingTransport),
            DecodingParams::default(),
            1,
        );

        let err = client.invoke("a").await.unwrap_err();
        assert!(matches!(err, TransportError::WorkerFailed(_)));
        assert_eq!(client.available_workers(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_calls_are_bounded() {
        let transport = Arc::new(SlowTransport::default());
        let client =
            InferenceClient::with_params(transport.clone(), DecodingParams::default(), 2);

        let mut handles = Vec::new();
        for i in 0..8 {
            let client = client.clone();
            handles.push(tokio::spawn(async move {
                client.invoke(&format!("prompt {i}")).await
            }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), "ok");
        }

        assert!(transport.peak.load(Ordering::SeqCst) <= 2);
        assert_eq!(client.available_workers(), 2);
    }

    #[test]
    fn test_zero_bound_treated_as_one() {
        let client = InferenceClient::with_params(
            Arc::new(ScriptedTransport::default()),
            DecodingParams::default(),
            0,
        );
        assert_eq!(client.available_workers(), 1);
    }
}
