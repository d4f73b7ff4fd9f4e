//! Structured PII extraction with bounded retries
//!
//! Each attempt sends the same extraction prompt and validates the completion
//! as a [`PiiRecord`]. The loop moves through three states:
//!
//! - attempting: call the model, validate the completion
//! - validated: a record parsed; return it without further attempts
//! - exhausted: `max_attempts` completions failed validation
//!
//! Between attempts the task sleeps for the entry of the backoff table that
//! belongs to the next attempt (1 s before the 2nd, 2 s before the 3rd with
//! the default table). No delay follows the final failure.
//!
//! Schema failures are absorbed here. Transport failures are not retried
//! and propagate to the caller.

use super::inference::InferenceClient;
use super::prompts::extraction_prompt;
use crate::config::ExtractionConfig;
use crate::domain::{ExtractionOutcome, PiiRecord, Result};
use std::time::Duration;

/// Extract a [`PiiRecord`] from a sentence
#[derive(Debug, Clone)]
pub struct PiiExtractor {
    client: InferenceClient,
    max_attempts: usize,
    backoff: Vec<Duration>,
}

impl PiiExtractor {
    /// Create an extractor with the configured attempt cap and delay table
    pub fn new(client: InferenceClient, config: &ExtractionConfig) -> Self {
        Self {
            client,
            max_attempts: config.max_attempts.max(1),
            backoff: config.backoff_schedule(),
        }
    }

    /// Delay to wait before `attempt` (1-based)
    ///
    /// The first attempt never waits. A table shorter than needed repeats its
    /// last entry.
    pub fn backoff_before(&self, attempt: usize) -> Duration {
        if attempt <= 1 {
            return Duration::ZERO;
        }
        self.backoff
            .get(attempt - 2)
            .or_else(|| self.backoff.last())
            .copied()
            .unwrap_or(Duration::ZERO)
    }

    /// Run the extraction protocol for one sentence
    ///
    /// Returns [`ExtractionOutcome::Extracted`] on the first attempt whose
    /// completion validates, or [`ExtractionOutcome::Exhausted`] after
    /// `max_attempts` failures.
    ///
    /// # Errors
    ///
    /// Returns a transport error as soon as any model call fails.
    pub async fn extract(&self, sentence: &str) -> Result<ExtractionOutcome> {
        let prompt = extraction_prompt(sentence);
        let mut attempt = 1;

        loop {
            let completion = self.client.invoke(&prompt).await?;

            let failure = match PiiRecord::from_response(&completion) {
                Ok(record) => {
                    tracing::info!(
                        attempt,
                        fields_found = record.populated_pii_fields(),
                        "Extraction response validated"
                    );
                    return Ok(ExtractionOutcome::Extracted { record, attempt });
                }
                Err(e) => e,
            };

            tracing::warn!(
                attempt,
                max_attempts = self.max_attempts,
                error = %failure,
                "Extraction response failed schema validation"
            );

            if attempt >= self.max_attempts {
                tracing::warn!(attempts = attempt, "Extraction exhausted");
                return Ok(ExtractionOutcome::Exhausted { attempts: attempt });
            }

            attempt += 1;
            let delay = self.backoff_before(attempt);
            crate::log_retry_attempt!(attempt, self.max_attempts, delay, failure);
            tokio::time::sleep(delay).await;
        }
    }
}
