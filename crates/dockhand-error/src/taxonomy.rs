// SPDX-License-Identifier: MIT OR Apache-2.0
//! The closed set of failures a control-plane call can produce.

use std::fmt;

use dockhand_wire::{TransportSnapshot, WireErrorResponse};
use thiserror::Error;

use crate::class::StatusClass;

/// What every refused-by-engine variant carries: a resolved message, the
/// parsed wire payload (if the body parsed), and the raw transport snapshot.
///
/// Ownership of both attachments is exclusive to the error; nothing else
/// retains a reference after construction.
#[derive(Debug)]
pub struct Rejection {
    message: String,
    wire: Option<WireErrorResponse>,
    transport: Option<TransportSnapshot>,
}

impl Rejection {
    /// Build a rejection, resolving the message deterministically: an
    /// explicit override wins, else the wire payload's message, else the
    /// caller-supplied fallback.
    pub fn new(
        wire: Option<WireErrorResponse>,
        transport: Option<TransportSnapshot>,
        message: Option<String>,
        fallback: &str,
    ) -> Self {
        let message = message
            .or_else(|| wire.as_ref().map(|w| w.message().to_owned()))
            .unwrap_or_else(|| fallback.to_owned());
        Self {
            message,
            wire,
            transport,
        }
    }

    /// The resolved human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The parsed engine error payload, if the body parsed.
    pub fn wire(&self) -> Option<&WireErrorResponse> {
        self.wire.as_ref()
    }

    /// The raw transport snapshot of the failed call.
    pub fn transport(&self) -> Option<&TransportSnapshot> {
        self.transport.as_ref()
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Tag naming a taxonomy member in a selection table.
///
/// Kinds exist so tables can be plain data; [`ErrorKind::raise`] turns a
/// matched row into the actual [`EngineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Generic policy refusal.
    Forbidden,
    /// Creating or mutating an engine-reserved network.
    NetworkCreateForbidden,
    /// Resource already exists or is still in use.
    Conflict,
    /// Referenced resource is absent.
    NotFound,
}

impl ErrorKind {
    /// Fixed message used when neither an override nor a wire payload
    /// supplies one.
    pub fn fallback_message(self) -> &'static str {
        match self {
            Self::Forbidden => "operation forbidden by the engine",
            Self::NetworkCreateForbidden => "operation not supported for pre-defined networks",
            Self::Conflict => "resource already exists",
            Self::NotFound => "no such resource",
        }
    }

    /// Construct the taxonomy member for this kind, taking ownership of the
    /// wire payload and transport snapshot.
    pub fn raise(
        self,
        wire: Option<WireErrorResponse>,
        transport: Option<TransportSnapshot>,
        message: Option<String>,
    ) -> EngineError {
        let rejection = Rejection::new(wire, transport, message, self.fallback_message());
        match self {
            Self::Forbidden => EngineError::Forbidden(rejection),
            Self::NetworkCreateForbidden => EngineError::NetworkCreateForbidden(rejection),
            Self::Conflict => EngineError::Conflict(rejection),
            Self::NotFound => EngineError::NotFound(rejection),
        }
    }
}

/// Every failure a control-plane call can surface.
///
/// The set is closed so call sites can match exhaustively;
/// [`EngineError::Other`] is the extension point for engine behavior not yet
/// modeled by a named variant.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine refused the operation on policy grounds.
    #[error("forbidden: {0}")]
    Forbidden(Rejection),

    /// The engine refused to create or mutate a pre-defined network.
    ///
    /// A narrower [`Forbidden`](Self::Forbidden): same attachments, no extra
    /// state. It exists purely so callers can match on this case.
    #[error("network create forbidden: {0}")]
    NetworkCreateForbidden(Rejection),

    /// The operation collides with existing state (name taken, still in
    /// use, still running).
    #[error("conflict: {0}")]
    Conflict(Rejection),

    /// The referenced resource does not exist.
    #[error("not found: {0}")]
    NotFound(Rejection),

    /// A failure status with no named variant; carries its class verbatim.
    #[error("engine error ({class}): {rejection}")]
    Other {
        /// Semantic class of the unmodeled status.
        class: StatusClass,
        /// Attachments, as for any named variant.
        rejection: Rejection,
    },

    /// No response was obtained: connect failure, timeout, or a connection
    /// lost mid-response. Carries no wire payload and no snapshot.
    #[error("engine unreachable: {message}")]
    Unreachable {
        /// What the transport reported.
        message: String,
        /// Underlying transport error, when one exists.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The engine answered with a success status but the body did not
    /// deserialize into the expected resource value.
    #[error("failed to decode engine response: {message}")]
    Decode {
        /// What failed to decode, and why.
        message: String,
    },
}

impl EngineError {
    /// An [`Unreachable`](Self::Unreachable) without an underlying cause.
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::Unreachable {
            message: message.into(),
            source: None,
        }
    }

    /// An [`Unreachable`](Self::Unreachable) wrapping a transport error.
    pub fn unreachable_from(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Unreachable {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// A [`Decode`](Self::Decode) failure.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Forbidden(r)
            | Self::NetworkCreateForbidden(r)
            | Self::Conflict(r)
            | Self::NotFound(r) => Some(r),
            Self::Other { rejection, .. } => Some(rejection),
            Self::Unreachable { .. } | Self::Decode { .. } => None,
        }
    }

    /// The resolved human-readable message, uniform across variants.
    pub fn message(&self) -> &str {
        match self {
            Self::Unreachable { message, .. } | Self::Decode { message } => message,
            other => other
                .rejection()
                .map(Rejection::message)
                .unwrap_or_default(),
        }
    }

    /// The parsed engine error payload, when the failed call produced one.
    pub fn wire_error(&self) -> Option<&WireErrorResponse> {
        self.rejection().and_then(Rejection::wire)
    }

    /// The raw transport snapshot, when a response was obtained.
    pub fn transport(&self) -> Option<&TransportSnapshot> {
        self.rejection().and_then(Rejection::transport)
    }

    /// The raw status code out of the snapshot, for reporting only.
    pub fn status_code(&self) -> Option<u16> {
        self.transport().map(TransportSnapshot::status_code)
    }
}
