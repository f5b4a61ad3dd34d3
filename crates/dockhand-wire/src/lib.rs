// SPDX-License-Identifier: MIT OR Apache-2.0
//! Wire-level data for the container engine: parsed error payloads and
//! immutable captures of failed protocol exchanges.
//!
//! This crate is pure data. [`WireErrorResponse`] is the engine's structured
//! error body after parsing; [`TransportSnapshot`] is the raw protocol
//! outcome (status, headers, body) of a call that was recognized as failed.
//! Both are constructed once and never mutated; the error taxonomy in
//! `dockhand-error` owns them from then on.
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod snapshot;
pub mod wire;

pub use snapshot::TransportSnapshot;
pub use wire::{WireErrorResponse, WireParseError};
