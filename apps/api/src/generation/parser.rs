//! Response Parser: pulls the JSON object out of free-form model output.
//!
//! Models are told to return bare JSON, but regularly wrap it in a ```json fence
//! or surround it with prose. Extraction is a best-effort heuristic:
//!
//! 1. a fenced block (lazy match up to the first `}` directly before a fence),
//! 2. the whole text parsed strictly,
//! 3. the first greedy `{ ... }` span, from the first `{` to the last `}`.
//!
//! Known limitation: the greedy span swallows everything between the payload and
//! the last closing brace, so trailing prose that contains `}` defeats step 3.
//! The lazy fence pattern in step 1 can stop early when a string value inside
//! the payload itself contains "}```". Both cases fall through to "not found".

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

fn fenced_block() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").expect("valid regex"))
}

fn greedy_object() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("valid regex"))
}

/// Extracts the first JSON object from `text`.
///
/// Returns `None` for empty input, for input with no parseable object, and for
/// payloads that parse to something other than an object. Never panics.
pub fn extract_json(text: &str) -> Option<Value> {
    if text.is_empty() {
        return None;
    }

    let candidate = fenced_block()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map_or(text, |m| m.as_str());

    if let Some(value) = parse_object(candidate) {
        return Some(value);
    }

    greedy_object()
        .find(candidate)
        .and_then(|m| parse_object(m.as_str()))
}

fn parse_object(candidate: &str) -> Option<Value> {
    serde_json::from_str::<Value>(candidate)
        .ok()
        .filter(Value::is_object)
}
