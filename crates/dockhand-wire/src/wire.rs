// SPDX-License-Identifier: MIT OR Apache-2.0
//! Structured error payloads returned by the container engine.

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

/// Ways an engine error body can fail to parse.
///
/// None of these is an error in itself from the caller's point of view: the
/// call already failed, and the taxonomy falls back to a class-generic
/// member when the body is unusable. The raw bytes stay available inside the
/// transport snapshot.
#[derive(Debug, Error)]
pub enum WireParseError {
    /// The body was empty or whitespace.
    #[error("error body is empty")]
    Empty,

    /// The body was not valid JSON.
    #[error("error body is not valid JSON: {0}")]
    Json(#[source] serde_json::Error),

    /// The body parsed, but the top level is not a JSON object.
    #[error("error body is not a JSON object")]
    NotAnObject,

    /// The object carries no non-empty `message` field.
    ///
    /// The engine always names its failures; a failure response without a
    /// message is a malformed payload.
    #[error("error body has no message")]
    MissingMessage,
}

/// Parsed engine error payload.
///
/// Constructed only by [`WireErrorResponse::parse`] from an error-status
/// response body; immutable afterwards. Parsing the same bytes twice yields
/// equal values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireErrorResponse {
    message: String,
    details: BTreeMap<String, String>,
}

impl WireErrorResponse {
    /// Parse an untrusted error body.
    ///
    /// Never panics. Callers must only pass bodies of failure responses;
    /// success bodies never reach this parser.
    pub fn parse(raw: &[u8]) -> Result<Self, WireParseError> {
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Err(WireParseError::Empty);
        }
        let value: Value = serde_json::from_slice(raw).map_err(WireParseError::Json)?;
        let object = value.as_object().ok_or(WireParseError::NotAnObject)?;
        let message = match object.get("message").and_then(Value::as_str) {
            Some(m) if !m.is_empty() => m.to_owned(),
            _ => return Err(WireParseError::MissingMessage),
        };
        // Any other string-valued top-level field is kept as a detail; the
        // engine uses these for reason codes.
        let details = object
            .iter()
            .filter(|(key, _)| key.as_str() != "message")
            .filter_map(|(key, value)| value.as_str().map(|s| (key.clone(), s.to_owned())))
            .collect();
        Ok(Self { message, details })
    }

    /// The engine's human-readable failure description. Never empty.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Structured fields the engine included alongside the message.
    pub fn details(&self) -> &BTreeMap<String, String> {
        &self.details
    }

    /// Convenience lookup into [`details`](Self::details).
    pub fn detail(&self, key: &str) -> Option<&str> {
        self.details.get(key).map(String::as_str)
    }
}
