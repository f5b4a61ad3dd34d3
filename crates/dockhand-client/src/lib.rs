// SPDX-License-Identifier: MIT OR Apache-2.0
//! Typed async client for a container-engine control plane.
//!
//! [`EngineClient`] is the composition root: it owns the transport
//! configuration and exposes one method per resource operation. Each
//! operation issues exactly one HTTP round trip against the engine's REST
//! API and yields either a typed resource value or one [`EngineError`]
//! taxonomy member. The client is stateless and safe to share across tasks;
//! retries, if wanted, belong to the caller.
//!
//! ```no_run
//! use dockhand_client::{EngineClient, EngineConfig, EngineError, networks::NetworkSpec};
//!
//! # async fn demo() -> Result<(), EngineError> {
//! let client = EngineClient::new(&EngineConfig::default()).expect("valid config");
//! match client.create_network(&NetworkSpec::new("app-net")).await {
//!     Ok(created) => println!("network {}", created.id),
//!     Err(EngineError::NetworkCreateForbidden(rejection)) => {
//!         eprintln!("reserved name: {}", rejection.message());
//!     }
//!     Err(other) => return Err(other),
//! }
//! # Ok(())
//! # }
//! ```
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod containers;
pub mod images;
pub mod networks;

pub use client::EngineClient;
pub use config::{ConfigError, EngineConfig};

// Re-export the taxonomy and wire types so callers need only this crate.
pub use dockhand_error::{EngineError, ErrorKind, Rejection, SelectionRule, StatusClass, select};
pub use dockhand_wire::{TransportSnapshot, WireErrorResponse, WireParseError};

/// Result alias for control-plane operations.
pub type Result<T> = std::result::Result<T, EngineError>;
