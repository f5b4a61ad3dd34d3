// SPDX-License-Identifier: MIT OR Apache-2.0
//! Immutable captures of failed protocol exchanges.

use std::borrow::Cow;
use std::collections::BTreeMap;

/// Raw protocol-level outcome of a failed call.
///
/// Constructed exactly once, at the moment a call is recognized as failed,
/// and owned by the taxonomy member raised for that call. It is forensic
/// evidence only: callers branch on the taxonomy variant, never on the
/// status code stored here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportSnapshot {
    status: u16,
    headers: BTreeMap<String, String>,
    body: Vec<u8>,
}

impl TransportSnapshot {
    /// Capture a failed response. Header names are lowercased.
    pub fn new(status: u16, headers: BTreeMap<String, String>, body: Vec<u8>) -> Self {
        let headers = headers
            .into_iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), value))
            .collect();
        Self {
            status,
            headers,
            body,
        }
    }

    /// The raw HTTP status code.
    pub fn status_code(&self) -> u16 {
        self.status
    }

    /// Response headers, names lowercased.
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Case-insensitive single-header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// The raw response body, exactly as received.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Lossy UTF-8 view of the body, for diagnostics.
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> TransportSnapshot {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_owned(), "application/json".to_owned());
        TransportSnapshot::new(403, headers, b"{\"message\":\"denied\"}".to_vec())
    }

    #[test]
    fn exposes_status_and_body() {
        let snap = snapshot();
        assert_eq!(snap.status_code(), 403);
        assert_eq!(snap.body(), b"{\"message\":\"denied\"}");
        assert_eq!(snap.body_text(), "{\"message\":\"denied\"}");
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let snap = snapshot();
        assert_eq!(snap.header("content-type"), Some("application/json"));
        assert_eq!(snap.header("CONTENT-TYPE"), Some("application/json"));
        assert_eq!(snap.header("x-missing"), None);
    }

    #[test]
    fn non_utf8_body_still_has_a_text_view() {
        let snap = TransportSnapshot::new(500, BTreeMap::new(), vec![0xff, 0xfe]);
        assert!(!snap.body_text().is_empty());
    }
}
