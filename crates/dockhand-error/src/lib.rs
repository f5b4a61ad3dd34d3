// SPDX-License-Identifier: MIT OR Apache-2.0
//! Typed failure taxonomy for the container-engine client.
//!
//! Every non-success outcome of a control-plane call becomes exactly one
//! [`EngineError`] variant. Variants raised from an engine response carry a
//! [`Rejection`], the engine's parsed error payload plus a raw transport
//! snapshot, so generic code can log uniformly while call sites match on
//! the variant they care about. The mapping from status code to variant is
//! table-driven: each resource operation declares its [`SelectionRule`]s and
//! [`select`] applies them, so the status↔meaning binding lives in one
//! reviewable place per operation instead of at every call site.
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod class;
pub mod select;
pub mod taxonomy;

pub use class::StatusClass;
pub use select::{SelectionRule, select};
pub use taxonomy::{EngineError, ErrorKind, Rejection};
