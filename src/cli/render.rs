//! Console rendering of inspection results

use crate::core::Inspection;
use crate::domain::{ExtractionOutcome, PiiRecord};

const BLUE: &str = "\x1b[94m";
const GREEN: &str = "\x1b[92m";
const RED: &str = "\x1b[91m";
const YELLOW: &str = "\x1b[93m";
const RESET: &str = "\x1b[0m";

pub const SEPARATOR: &str = "------------------------";

/// Formats inspections for the terminal, optionally with ANSI colors
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    /// Sentence echo, verdict and, when positive, the extraction result
    pub fn inspection(&self, sentence: &str, inspection: &Inspection) -> String {
        let verdict_color = if inspection.contains_pii { GREEN } else { RED };
        let verdict = if inspection.contains_pii { "True" } else { "False" };

        let mut out = format!(
            "{} '{}'\n{} {}\n",
            self.paint(BLUE, "SENTENCE:"),
            sentence,
            self.paint(BLUE, "Contains PII:"),
            self.paint(verdict_color, verdict),
        );

        match &inspection.extraction {
            Some(ExtractionOutcome::Extracted { record, .. }) => {
                out.push('\n');
                out.push_str(&self.paint(BLUE, "EXTRACTED PII:"));
                out.push('\n');
                out.push_str(&self.record(record));
            }
            Some(ExtractionOutcome::Exhausted { attempts }) => {
                out.push('\n');
                out.push_str(&self.paint(
                    RED,
                    &format!("Could not extract PII: no valid response after {attempts} attempts"),
                ));
                out.push('\n');
            }
            None => {}
        }

        out.push_str(SEPARATOR);
        out.push('\n');
        out
    }

    /// One `Label: value` line per field; absent fields print as `null`
    pub fn record(&self, record: &PiiRecord) -> String {
        record
            .fields()
            .iter()
            .map(|(field, value)| {
                format!(
                    "{} {}\n",
                    self.paint(YELLOW, &format!("{}:", field_label(field))),
                    value.unwrap_or("null")
                )
            })
            .collect()
    }

    /// Error line for a failed turn
    pub fn turn_error(&self, message: &str) -> String {
        format!("{} {}\n{SEPARATOR}\n", self.paint(RED, "Error:"), message)
    }
}

/// `social_security_number` -> `Social_security_number`
fn field_label(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
