//! Content Normalizer: turns the parser's result into the canonical record.
//!
//! The output is always complete: a malformed model response degrades to a
//! summary-only resume and a placeholder cover letter, never to an error.

use serde_json::Value;

use crate::models::resume::ResumeRecord;

/// Substituted when the model produced no cover letter text.
pub const COVER_LETTER_PLACEHOLDER: &str =
    "Dear Hiring Manager,\n\n[Your tailored cover letter will appear here.]\n";

/// Normalized model output.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedContent {
    pub resume: ResumeRecord,
    pub cover_letter: String,
}

/// Builds the canonical record from the parsed payload and the raw model text.
///
/// Salvage rule: when the payload carries no `resume` object at all (parse
/// failed, key missing, null or not an object) and the raw text is non-empty,
/// the trimmed raw text becomes the summary. An explicit `"resume": {}` is
/// respected and stays empty.
pub fn normalize(parsed: Option<&Value>, raw: &str) -> NormalizedContent {
    let resume_value = parsed
        .and_then(|data| data.get("resume"))
        .filter(|v| v.is_object());

    let mut resume = resume_value
        .map(ResumeRecord::from_value)
        .unwrap_or_default();

    // Narrower than "resume is empty": `{"resume": {}}` must render an empty record.
    let trimmed = raw.trim();
    if resume_value.is_none() && !trimmed.is_empty() {
        resume.summary = Some(trimmed.to_string());
    }

    let cover_letter = parsed
        .and_then(|data| cover_text(data, "cover_letter").or_else(|| cover_text(data, "coverLetter")))
        .unwrap_or_else(|| COVER_LETTER_PLACEHOLDER.to_string());

    NormalizedContent {
        resume,
        cover_letter,
    }
}

/// Reads a non-empty cover letter. Models occasionally return a paragraph array,
/// which is joined with line breaks so the renderer splits it back apart.
fn cover_text(data: &Value, key: &str) -> Option<String> {
    let text = match data.get(key)? {
        Value::String(s) => s.clone(),
        Value::Array(parts) => parts
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join("\n"),
        _ => return None,
    };
    (!text.trim().is_empty()).then_some(text)
}
