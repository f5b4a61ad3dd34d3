// SPDX-License-Identifier: MIT OR Apache-2.0
//! Client configuration.

use std::time::Duration;

use thiserror::Error;

/// Problems found while validating an [`EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The base address did not parse as an absolute HTTP(S) URL.
    #[error("invalid base address '{address}': {reason}")]
    InvalidBaseAddress {
        /// The offending address.
        address: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The request timeout is zero.
    #[error("timeout must be non-zero")]
    ZeroTimeout,

    /// The underlying HTTP transport could not be built.
    #[error("failed to build HTTP transport")]
    Transport(#[source] reqwest::Error),
}

/// Connection settings for the engine control plane.
///
/// Timeouts are enforced here, at the transport level; an operation whose
/// response does not arrive in time surfaces as
/// [`EngineError::Unreachable`](dockhand_error::EngineError::Unreachable).
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Base URL of the engine API, e.g. `http://localhost:2375`.
    pub base_address: String,
    /// Optional API version segment prefixed to every path, e.g. `v1.43`.
    pub api_version: Option<String>,
    /// Whole-request timeout.
    pub timeout: Duration,
    /// Connection-establishment timeout.
    pub connect_timeout: Duration,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_address: "http://localhost:2375".to_owned(),
            api_version: None,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
            user_agent: concat!("dockhand/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

impl EngineConfig {
    /// Config pointing at the given base address, defaults elsewhere.
    pub fn new(base_address: impl Into<String>) -> Self {
        Self {
            base_address: base_address.into(),
            ..Self::default()
        }
    }

    /// Override the base address.
    pub fn with_base_address(mut self, base_address: impl Into<String>) -> Self {
        self.base_address = base_address.into();
        self
    }

    /// Pin an engine API version, e.g. `v1.43`.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// Override the whole-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the connection-establishment timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}
