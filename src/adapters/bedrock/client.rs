//! Bedrock runtime transport
//!
//! Calls `POST {endpoint}/model/{model_id}/invoke` with a SigV4-signed JSON
//! body using the blocking reqwest client. The HTTP client is created on
//! first use, which always happens on a worker thread.

use super::models::{CompletionBody, CompletionPayload, ErrorPayload};
use super::signing::{canonical_path, uri_encode, RequestSigner};
use crate::adapters::transport::InferenceTransport;
use crate::config::{Credentials, InferenceConfig};
use crate::domain::{GuardError, InferenceRequest, InferenceResponse, Result, TransportError};
use chrono::Utc;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use std::sync::OnceLock;
use std::time::Duration;

const SIGNING_SERVICE: &str = "bedrock";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Transport for the AWS Bedrock `InvokeModel` API
///
/// # Example
///
/// ```no_run
/// use piiguard::adapters::bedrock::BedrockTransport;
/// use piiguard::config::{Credentials, InferenceConfig};
///
/// # fn example() -> piiguard::domain::Result<()> {
/// let transport = BedrockTransport::new(&InferenceConfig::default(), Credentials::from_env())?;
/// # Ok(())
/// # }
/// ```
pub struct BedrockTransport {
    origin: String,
    host: String,
    path: String,
    region: String,
    model_id: String,
    timeout: Duration,
    credentials: Credentials,
    client: OnceLock<Client>,
}

impl BedrockTransport {
    /// Create a transport from inference configuration and credentials
    ///
    /// Missing credentials are accepted here and reported on the first call.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the endpoint URL cannot be parsed.
    pub fn new(config: &InferenceConfig, credentials: Credentials) -> Result<Self> {
        let endpoint = config.endpoint();
        let url = url::Url::parse(&endpoint).map_err(|e| {
            GuardError::Configuration(format!("Invalid inference endpoint '{endpoint}': {e}"))
        })?;
        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_string(),
            (None, _) => {
                return Err(GuardError::Configuration(format!(
                    "Inference endpoint '{endpoint}' has no host"
                )))
            }
        };

        // a path on the endpoint (e.g. behind a proxy) is part of the signed path
        let path = format!(
            "{}/model/{}/invoke",
            url.path().trim_end_matches('/'),
            uri_encode(&config.model_id)
        );

        Ok(Self {
            origin: url.origin().ascii_serialization(),
            path,
            host,
            region: config.region.clone(),
            model_id: config.model_id.clone(),
            timeout: config.timeout(),
            credentials,
            client: OnceLock::new(),
        })
    }

    /// Full URL of the invoke call
    pub fn invoke_url(&self) -> String {
        format!("{}{}", self.origin, self.path)
    }

    fn http_client(&self) -> std::result::Result<&Client, TransportError> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| TransportError::ConnectionFailed(format!("HTTP client setup: {e}")))?;

        // a racing worker may have won; either client is fine
        let _ = self.client.set(client);
        self.client
            .get()
            .ok_or_else(|| TransportError::WorkerFailed("HTTP client unavailable".to_string()))
    }
}

impl InferenceTransport for BedrockTransport {
    fn invoke_model(
        &self,
        request: &InferenceRequest,
    ) -> std::result::Result<InferenceResponse, TransportError> {
        let (true, Some(access_key_id), Some(secret_access_key)) = (
            self.credentials.is_complete(),
            self.credentials.access_key_id.as_deref(),
            self.credentials.secret_access_key.as_ref(),
        ) else {
            return Err(TransportError::AuthenticationFailed(format!(
                "missing credentials: {}",
                self.credentials.missing().join(", ")
            )));
        };

        let body = serde_json::to_vec(&CompletionBody::from(request))
            .map_err(|e| TransportError::InvalidResponse(format!("request encoding: {e}")))?;

        let session_token = self
            .credentials
            .session_token
            .as_ref()
            .map(|t| t.expose_secret().as_ref());
        let signer = RequestSigner {
            access_key_id,
            secret_access_key: secret_access_key.expose_secret().as_ref(),
            session_token,
            region: &self.region,
            service: SIGNING_SERVICE,
        };
        let signed = signer.sign_post(
            &self.host,
            &canonical_path(&self.path),
            JSON_CONTENT_TYPE,
            &body,
            Utc::now(),
        )?;

        let mut http_request = self
            .http_client()?
            .post(self.invoke_url())
            .header("content-type", JSON_CONTENT_TYPE)
            .header("accept", JSON_CONTENT_TYPE)
            .header("x-amz-date", &signed.amz_date)
            .header("authorization", &signed.authorization);
        if let Some(token) = &signed.security_token {
            http_request = http_request.header("x-amz-security-token", token);
        }

        tracing::debug!(
            model_id = %self.model_id,
            prompt_chars = request.prompt.len(),
            "Invoking model"
        );

        let response = http_request.body(body).send().map_err(map_send_error)?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            let message = serde_json::from_str::<ErrorPayload>(&text)
                .map(|p| p.message)
                .unwrap_or(text);
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    TransportError::AuthenticationFailed(message)
                }
                _ => TransportError::ServiceError {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        let payload: CompletionPayload = response
            .json()
            .map_err(|e| TransportError::InvalidResponse(e.to_string()))?;

        tracing::debug!(
            model_id = %self.model_id,
            stop_reason = payload.stop_reason.as_deref().unwrap_or("unknown"),
            completion_chars = payload.completion.len(),
            "Model invocation completed"
        );

        Ok(InferenceResponse::new(payload.completion))
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

fn map_send_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout(e.to_string())
    } else {
        TransportError::ConnectionFailed(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(endpoint: &str) -> InferenceConfig {
        InferenceConfig {
            endpoint_url: Some(endpoint.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_invoke_url_default_endpoint() {
        let transport =
            BedrockTransport::new(&InferenceConfig::default(), Credentials::default()).unwrap();
        assert_eq!(
            transport.invoke_url(),
            "https://bedrock-runtime.us-east-1.amazonaws.com/model/anthropic.claude-v1/invoke"
        );
        assert_eq!(transport.host, "bedrock-runtime.us-east-1.amazonaws.com");
    }

    #[test]
    fn test_host_keeps_explicit_port() {
        let transport =
            BedrockTransport::new(&config_for("http://127.0.0.1:4566"), Credentials::default())
                .unwrap();
        assert_eq!(transport.host, "127.0.0.1:4566");
    }

    #[test]
    fn test_endpoint_path_prefix_is_sent_and_signed() {
        let transport = BedrockTransport::new(
            &config_for("https://proxy.example/bedrock/"),
            Credentials::default(),
        )
        .unwrap();
        assert_eq!(
            transport.invoke_url(),
            "https://proxy.example/bedrock/model/anthropic.claude-v1/invoke"
        );
        assert_eq!(transport.path, "/bedrock/model/anthropic.claude-v1/invoke");
        assert_eq!(transport.host, "proxy.example");
    }

    #[test]
    fn test_model_id_is_encoded_in_path() {
        let config = InferenceConfig {
            model_id: "anthropic.claude-v2:1".to_string(),
            ..Default::default()
        };
        let transport = BedrockTransport::new(&config, Credentials::default()).unwrap();
        assert!(transport.invoke_url().ends_with("/model/anthropic.claude-v2%3A1/invoke"));
        assert_eq!(transport.model_id(), "anthropic.claude-v2:1");
    }

    #[test]
    fn test_missing_credentials_fail_on_call() {
        let transport =
            BedrockTransport::new(&config_for("http://127.0.0.1:9"), Credentials::default())
                .unwrap();
        let request =
            InferenceRequest::new("prompt", crate::domain::DecodingParams::default());

        let err = transport.invoke_model(&request).unwrap_err();
        match err {
            TransportError::AuthenticationFailed(msg) => {
                assert!(msg.contains("AWS_ACCESS_KEY_ID"));
                assert!(msg.contains("AWS_SECRET_ACCESS_KEY"));
            }
            other => panic!("Expected AuthenticationFailed, got {other:?}"),
        }
    }
}
