// SPDX-License-Identifier: MIT OR Apache-2.0
//! Semantic status classes for engine responses.

use std::fmt;

/// Broad semantic class of a failure status code.
///
/// This is the left-hand column of every selection table. The mapping from
/// raw code to class is fixed here and nowhere else; callers never inspect
/// raw status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusClass {
    /// 400: the engine rejected the request as malformed.
    BadRequest,
    /// 403: the operation is disallowed by engine policy.
    Forbidden,
    /// 404: the referenced resource does not exist.
    NotFound,
    /// 409: the operation collides with existing state.
    Conflict,
    /// 500 through 599: the engine failed internally.
    ServerError,
    /// Any other non-success code, kept verbatim.
    Other(u16),
}

impl StatusClass {
    /// Classify a raw status code.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            409 => Self::Conflict,
            500..=599 => Self::ServerError,
            other => Self::Other(other),
        }
    }
}

impl fmt::Display for StatusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest => f.write_str("bad request"),
            Self::Forbidden => f.write_str("forbidden"),
            Self::NotFound => f.write_str("not found"),
            Self::Conflict => f.write_str("conflict"),
            Self::ServerError => f.write_str("server error"),
            Self::Other(code) => write!(f, "status {code}"),
        }
    }
}
