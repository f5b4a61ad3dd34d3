// SPDX-License-Identifier: MIT OR Apache-2.0
//! Table-driven mapping from a failed response to a taxonomy member.

use dockhand_wire::{TransportSnapshot, WireErrorResponse};

use crate::class::StatusClass;
use crate::taxonomy::{EngineError, ErrorKind, Rejection};

/// One row of an operation's selection table.
///
/// A row matches a failed response when its class equals the response's
/// status class and its reason, if present, equals the wire payload's
/// `reason` detail. Rows are checked in order; first match wins.
#[derive(Debug, Clone, Copy)]
pub struct SelectionRule {
    /// Status class this row applies to.
    pub class: StatusClass,
    /// Optional engine reason code narrowing the match.
    pub reason: Option<&'static str>,
    /// Taxonomy member to raise.
    pub kind: ErrorKind,
}

/// Apply an operation's selection table to a failed response.
///
/// Takes ownership of both attachments; whichever member is raised owns them
/// exclusively afterwards. When no row matches, the class-generic member is
/// raised, so an unparsed body or an unlisted status still surfaces as the
/// closest meaningful variant instead of being dropped.
pub fn select(
    rules: &[SelectionRule],
    wire: Option<WireErrorResponse>,
    transport: TransportSnapshot,
) -> EngineError {
    let class = StatusClass::from_status(transport.status_code());
    let matched = {
        let reason = wire.as_ref().and_then(|w| w.detail("reason"));
        rules
            .iter()
            .find(|rule| {
                rule.class == class && rule.reason.is_none_or(|needle| Some(needle) == reason)
            })
            .map(|rule| rule.kind)
    };
    match matched {
        Some(kind) => kind.raise(wire, Some(transport), None),
        None => match class {
            StatusClass::Forbidden => ErrorKind::Forbidden.raise(wire, Some(transport), None),
            StatusClass::Conflict => ErrorKind::Conflict.raise(wire, Some(transport), None),
            StatusClass::NotFound => ErrorKind::NotFound.raise(wire, Some(transport), None),
            class => EngineError::Other {
                class,
                rejection: Rejection::new(
                    wire,
                    Some(transport),
                    None,
                    "engine reported an unmodeled failure",
                ),
            },
        },
    }
}
