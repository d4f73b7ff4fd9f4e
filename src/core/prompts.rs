//! Prompt templates for classification and extraction
//!
//! Prompts use the Human/Assistant turn format. The completion stops at the
//! next `"\n\nHuman:"` marker.

use crate::domain::{ASSISTANT_TURN_MARKER, HUMAN_TURN_MARKER};

const CLASSIFICATION_INSTRUCTIONS: &str = r#"You can only respond with the word "True" or "False", where your answer indicates whether the text in the user's message contains PII.
Do not explain your answer, and do not use punctuation.
Your task is to identify whether the text extracted from your company files contains sensitive PII information that should not be shared with the broader company. Here are some things to look out for:
- An email address that identifies a specific person in either the local-part or the domain
- The postal address of a private residence (must include at least a street name)
- The postal address of a public place (must include either a street name or business name)
- Notes about hiring decisions with mentioned names of candidates
- A phone number that identifies a specific person
- A name that identifies a specific person"#;

const EXTRACTION_INSTRUCTIONS: &str = r#"Your job is to extract PII information from text. The output will be loaded as a JSON object, so respond with nothing but the JSON object. Use null for any field that is not present in the text. Your response must have exactly this format:
{
    "name": "The name of the person",
    "number": "The phone number of the person",
    "email": "The email of the person",
    "address": "The address of the person",
    "social_security_number": "The social security number of the person",
    "credit_card_number": "The credit card number of the person",
    "explanation": "Explanation of your answer"
}"#;

/// Prompt asking whether `sentence` contains PII
pub fn classification_prompt(sentence: &str) -> String {
    format!(
        "{HUMAN_TURN_MARKER} {CLASSIFICATION_INSTRUCTIONS}\n\nDoes the following sentence contain PII? {sentence}{ASSISTANT_TURN_MARKER}"
    )
}

/// Prompt asking for the PII in `sentence` as a JSON object
pub fn extraction_prompt(sentence: &str) -> String {
    format!(
        "{HUMAN_TURN_MARKER} {EXTRACTION_INSTRUCTIONS}\n\nExtract the PII from the following sentence: {sentence}{ASSISTANT_TURN_MARKER}"
    )
}
