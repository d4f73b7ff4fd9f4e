//! Binary PII classification
//!
//! The model is instructed to answer with the bare word `True` or `False`.
//! The answer is decoded by prefix: after trimming whitespace, only text that
//! starts with `True` counts as positive. Everything else, including empty or
//! off-protocol output, is negative. Content never produces an error; only a
//! failed transport call does.

use super::inference::InferenceClient;
use super::prompts::classification_prompt;
use crate::domain::Result;

/// Decide whether a sentence contains PII
#[derive(Debug, Clone)]
pub struct PiiClassifier {
    client: InferenceClient,
}

impl PiiClassifier {
    pub fn new(client: InferenceClient) -> Self {
        Self { client }
    }

    /// Classify one sentence
    ///
    /// # Errors
    ///
    /// Returns a transport error if the model call fails. The call is not
    /// retried.
    pub async fn classify(&self, sentence: &str) -> Result<bool> {
        let completion = self.client.invoke(&classification_prompt(sentence)).await?;
        let contains_pii = interpret_verdict(&completion);

        tracing::debug!(
            contains_pii,
            response_chars = completion.len(),
            "Classification completed"
        );

        Ok(contains_pii)
    }
}

/// Prefix decision rule for the model's verdict
///
/// # Example
///
/// ```
/// use piiguard::core::classifier::interpret_verdict;
///
/// assert!(interpret_verdict("  True\n"));
/// assert!(!interpret_verdict("False"));
/// assert!(!interpret_verdict("I think this is True"));
/// ```
pub fn interpret_verdict(response: &str) -> bool {
    response.trim().starts_with("True")
}
