//! PII record produced by extraction
//!
//! A [`PiiRecord`] is only ever built by validating the text a model returned
//! for the extraction prompt. Every field is optional: `None` means the model
//! did not assert the field, which is different from an empty string.

use super::errors::SchemaError;
use serde::Serialize;
use serde_json::{Map, Value};

/// Field names of the record, in rendering order
pub const RECORD_FIELDS: [&str; 7] = [
    "explanation",
    "name",
    "number",
    "email",
    "address",
    "social_security_number",
    "credit_card_number",
];

/// Structured PII extracted from one sentence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PiiRecord {
    explanation: Option<String>,
    name: Option<String>,
    number: Option<String>,
    email: Option<String>,
    address: Option<String>,
    social_security_number: Option<String>,
    credit_card_number: Option<String>,
}

impl PiiRecord {
    /// Validate a raw model response against the record schema
    ///
    /// Surrounding whitespace and a single markdown code fence are tolerated.
    /// Unknown keys are ignored, missing keys and `null` become `None`, and
    /// JSON numbers are accepted as their textual form. Anything else that is
    /// not a string is rejected.
    ///
    /// # Example
    ///
    /// ```
    /// use piiguard::domain::PiiRecord;
    ///
    /// let record = PiiRecord::from_response(r#"{"email": "a@b.com", "name": null}"#).unwrap();
    /// assert_eq!(record.email(), Some("a@b.com"));
    /// assert_eq!(record.name(), None);
    /// ```
    pub fn from_response(text: &str) -> Result<Self, SchemaError> {
        let body = strip_code_fence(text);
        let value: Value =
            serde_json::from_str(body).map_err(|e| SchemaError::MalformedJson(e.to_string()))?;

        let object = match value {
            Value::Object(map) => map,
            other => return Err(SchemaError::NotAnObject(json_kind(&other))),
        };

        Ok(Self {
            explanation: read_field(&object, "explanation")?,
            name: read_field(&object, "name")?,
            number: read_field(&object, "number")?,
            email: read_field(&object, "email")?,
            address: read_field(&object, "address")?,
            social_security_number: read_field(&object, "social_security_number")?,
            credit_card_number: read_field(&object, "credit_card_number")?,
        })
    }

    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Phone number
    pub fn number(&self) -> Option<&str> {
        self.number.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn social_security_number(&self) -> Option<&str> {
        self.social_security_number.as_deref()
    }

    pub fn credit_card_number(&self) -> Option<&str> {
        self.credit_card_number.as_deref()
    }

    /// All fields paired with their names, in [`RECORD_FIELDS`] order
    pub fn fields(&self) -> [(&'static str, Option<&str>); 7] {
        [
            (RECORD_FIELDS[0], self.explanation()),
            (RECORD_FIELDS[1], self.name()),
            (RECORD_FIELDS[2], self.number()),
            (RECORD_FIELDS[3], self.email()),
            (RECORD_FIELDS[4], self.address()),
            (RECORD_FIELDS[5], self.social_security_number()),
            (RECORD_FIELDS[6], self.credit_card_number()),
        ]
    }

    /// Number of PII fields present, not counting the explanation
    pub fn populated_pii_fields(&self) -> usize {
        self.fields()
            .iter()
            .skip(1)
            .filter(|(_, value)| value.is_some())
            .count()
    }
}

/// Terminal outcome of one extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    /// A response validated on the given attempt (1-based)
    Extracted { record: PiiRecord, attempt: usize },

    /// Every attempt failed schema validation
    Exhausted { attempts: usize },
}

impl ExtractionOutcome {
    /// The extracted record, if any
    pub fn record(&self) -> Option<&PiiRecord> {
        match self {
            ExtractionOutcome::Extracted { record, .. } => Some(record),
            ExtractionOutcome::Exhausted { .. } => None,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, ExtractionOutcome::Exhausted { .. })
    }
}

fn read_field(object: &Map<String, Value>, field: &str) -> Result<Option<String>, SchemaError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(SchemaError::InvalidField {
            field: field.to_string(),
            found: json_kind(other),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Remove one surrounding ``` fence (with optional language tag)
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // drop the language tag line, e.g. ```json
    match inner.find('\n') {
        Some(idx) if !inner[..idx].trim_start().starts_with('{') => inner[idx + 1..].trim(),
        _ => inner.trim(),
    }
}
