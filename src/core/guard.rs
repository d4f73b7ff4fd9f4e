//! Classify-then-extract orchestration
//!
//! Extraction only starts after classification returned `true`.

use super::classifier::PiiClassifier;
use super::extractor::PiiExtractor;
use super::inference::InferenceClient;
use crate::adapters::InferenceTransport;
use crate::config::GuardConfig;
use crate::domain::{ExtractionOutcome, Result};
use std::sync::Arc;
use std::time::Instant;

/// Result of inspecting one sentence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inspection {
    pub contains_pii: bool,

    /// Present only when `contains_pii` is true
    pub extraction: Option<ExtractionOutcome>,
}

/// Classifier and extractor sharing one inference client
#[derive(Debug, Clone)]
pub struct PiiGuard {
    classifier: PiiClassifier,
    extractor: PiiExtractor,
}

impl PiiGuard {
    pub fn new(classifier: PiiClassifier, extractor: PiiExtractor) -> Self {
        Self {
            classifier,
            extractor,
        }
    }

    /// Wire a guard from configuration and a transport
    ///
    /// # Example
    ///
    /// ```
    /// use piiguard::adapters::ScriptedTransport;
    /// use piiguard::config::GuardConfig;
    /// use piiguard::core::PiiGuard;
    /// use std::sync::Arc;
    ///
    /// let transport = Arc::new(ScriptedTransport::new(["False"]));
    /// let guard = PiiGuard::from_config(&GuardConfig::default(), transport);
    /// ```
    pub fn from_config(config: &GuardConfig, transport: Arc<dyn InferenceTransport>) -> Self {
        let client = InferenceClient::new(transport, &config.inference);
        Self::new(
            PiiClassifier::new(client.clone()),
            PiiExtractor::new(client, &config.extraction),
        )
    }

    /// Classify `sentence` and, when positive, extract its PII
    ///
    /// # Errors
    ///
    /// Propagates transport errors from either step.
    pub async fn inspect(&self, sentence: &str) -> Result<Inspection> {
        let started = Instant::now();
        let contains_pii = self.classifier.classify(sentence).await?;

        let extraction = if contains_pii {
            Some(self.extractor.extract(sentence).await?)
        } else {
            None
        };

        let fields_found = extraction
            .as_ref()
            .and_then(ExtractionOutcome::record)
            .map_or(0, |r| r.populated_pii_fields());
        crate::log_inspection_complete!(contains_pii, fields_found, started.elapsed());

        Ok(Inspection {
            contains_pii,
            extraction,
        })
    }
}
