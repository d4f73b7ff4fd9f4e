//! End-to-end classify/extract scenarios over a scripted transport

use piiguard::adapters::ScriptedTransport;
use piiguard::cli::render::Renderer;
use piiguard::cli::session::{InteractiveSession, PROMPT};
use piiguard::config::{ExtractionConfig, GuardConfig, InferenceConfig};
use piiguard::core::{InferenceClient, PiiClassifier, PiiExtractor, PiiGuard};
use piiguard::domain::{ExtractionOutcome, GuardError, TransportError};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

fn guard(transport: &Arc<ScriptedTransport>) -> PiiGuard {
    PiiGuard::from_config(&GuardConfig::default(), transport.clone())
}

#[tokio::test]
async fn test_ssn_sentence_is_classified_and_extracted() {
    let transport = Arc::new(ScriptedTransport::new([
        " True",
        r#"{
            "name": null,
            "number": null,
            "email": null,
            "address": null,
            "social_security_number": "123-45-6789",
            "credit_card_number": null,
            "explanation": "The sentence contains a social security number."
        }"#,
    ]));

    let inspection = guard(&transport)
        .inspect("My social security number is 123-45-6789")
        .await
        .unwrap();

    assert!(inspection.contains_pii);
    let record = inspection
        .extraction
        .as_ref()
        .and_then(ExtractionOutcome::record)
        .unwrap();
    assert_eq!(record.social_security_number(), Some("123-45-6789"));
    assert_eq!(record.name(), None);
    assert_eq!(record.credit_card_number(), None);
    assert_eq!(
        record.explanation(),
        Some("The sentence contains a social security number.")
    );
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test]
async fn test_email_record_with_fenced_response() {
    let transport = Arc::new(ScriptedTransport::new([
        "True",
        "```json\n{\"email\": \"jane.doe@example.com\", \"explanation\": \"email address\"}\n```",
    ]));

    let inspection = guard(&transport)
        .inspect("Reach me at jane.doe@example.com")
        .await
        .unwrap();

    let record = inspection
        .extraction
        .as_ref()
        .and_then(ExtractionOutcome::record)
        .unwrap();
    assert_eq!(record.email(), Some("jane.doe@example.com"));
    assert_eq!(record.populated_pii_fields(), 1);
}

#[tokio::test]
async fn test_non_pii_sentence_makes_one_call() {
    let transport = Arc::new(ScriptedTransport::new(["False"]));

    let inspection = guard(&transport)
        .inspect("The quarterly numbers look good")
        .await
        .unwrap();

    assert!(!inspection.contains_pii);
    assert!(inspection.extraction.is_none());
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test]
async fn test_unexpected_verdict_counts_as_negative() {
    let transport = Arc::new(ScriptedTransport::new(["Yes, it does."]));

    let inspection = guard(&transport).inspect("Call Bob").await.unwrap();

    assert!(!inspection.contains_pii);
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_exhausted_extraction_after_three_bad_responses() {
    let transport = Arc::new(ScriptedTransport::new([
        "True",
        "Sure! Here is the JSON you asked for.",
        r#"["not", "an", "object"]"#,
        r#"{"number": {"home": "555-0100"}}"#,
    ]));
    let started = Instant::now();

    let inspection = guard(&transport).inspect("Call 555-0100").await.unwrap();

    assert!(inspection.contains_pii);
    assert_eq!(
        inspection.extraction,
        Some(ExtractionOutcome::Exhausted { attempts: 3 })
    );
    assert_eq!(started.elapsed(), Duration::from_secs(3));
    assert_eq!(transport.call_count(), 4);
}

#[tokio::test]
async fn test_classification_transport_error_is_not_retried() {
    let transport = Arc::new(ScriptedTransport::default());
    transport.push_error(TransportError::ServiceError {
        status: 429,
        message: "throttled".to_string(),
    });
    transport.push_completion("True");

    let err = guard(&transport).inspect("My name is Ada").await.unwrap_err();

    assert!(matches!(
        err,
        GuardError::Transport(TransportError::ServiceError { status: 429, .. })
    ));
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test]
async fn test_concurrent_inspections_share_one_client() {
    let transport = Arc::new(ScriptedTransport::new(["False"; 8]));
    let inference = InferenceConfig {
        max_concurrent_requests: 2,
        ..InferenceConfig::default()
    };
    let client = InferenceClient::new(transport.clone(), &inference);
    let guard = PiiGuard::new(
        PiiClassifier::new(client.clone()),
        PiiExtractor::new(client.clone(), &ExtractionConfig::default()),
    );

    let mut handles = Vec::new();
    for i in 0..8 {
        let guard = guard.clone();
        handles.push(tokio::spawn(async move {
            guard.inspect(&format!("sentence {i}")).await
        }));
    }
    for handle in handles {
        assert!(!handle.await.unwrap().unwrap().contains_pii);
    }

    assert_eq!(transport.call_count(), 8);
    assert_eq!(client.available_workers(), 2);
}

#[tokio::test]
async fn test_session_renders_each_turn() {
    let transport = Arc::new(ScriptedTransport::new([
        "False",
        "True",
        r#"{"name": "Ada Lovelace", "explanation": "a name"}"#,
    ]));
    let guard = guard(&transport);
    let mut output = Vec::new();

    let summary = InteractiveSession::new(&guard, Renderer::new(false), &mut output)
        .run("nice weather\nI am Ada Lovelace\nExit\nnever read\n".as_bytes())
        .await
        .unwrap();
    let output = String::from_utf8(output).unwrap();

    assert_eq!(summary.turns, 2);
    assert_eq!(summary.failed_turns, 0);
    assert_eq!(transport.call_count(), 3);
    assert_eq!(output.matches(PROMPT).count(), 3);
    assert!(output.contains("SENTENCE: 'nice weather'\nContains PII: False\n"));
    assert!(output.contains("SENTENCE: 'I am Ada Lovelace'\nContains PII: True\n"));
    assert!(output.contains("Name: Ada Lovelace\n"));
    assert!(output.contains("Social_security_number: null\n"));
    assert!(!output.contains("never read"));
}
