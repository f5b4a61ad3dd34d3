// SPDX-License-Identifier: MIT OR Apache-2.0
//! Network resource operations.
//!
//! The create table is where the one specialized taxonomy member lives: the
//! engine answers 403 to any attempt to create (or otherwise mutate) one of
//! its pre-defined networks (`bridge`, `host`, `none`), and that row maps to
//! [`ErrorKind::NetworkCreateForbidden`] so callers can match on the narrow
//! case instead of string-matching a generic 403.

use std::collections::BTreeMap;

use dockhand_error::{ErrorKind, SelectionRule, StatusClass};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Result;
use crate::client::EngineClient;

/// Specification for a network to create. Opaque to the error layer; passed
/// through to the engine as-is.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NetworkSpec {
    /// Network name.
    pub name: String,
    /// Driver to use; the engine default applies when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,
    /// Restrict external access to the network.
    pub internal: bool,
    /// Driver-specific options.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, String>,
    /// User-defined labels.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

impl NetworkSpec {
    /// Spec with the given name and engine defaults for everything else.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            driver: None,
            internal: false,
            options: BTreeMap::new(),
            labels: BTreeMap::new(),
        }
    }
}

/// The engine's answer to a successful create.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NetworkCreated {
    /// Id of the created network.
    pub id: String,
    /// Advisory warning, empty when none.
    #[serde(default)]
    pub warning: String,
}

/// Network descriptor as returned by inspect and list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Network {
    /// Network id.
    pub id: String,
    /// Network name.
    pub name: String,
    /// Driver backing the network.
    #[serde(default)]
    pub driver: String,
    /// Scope (`local`, `swarm`, ...).
    #[serde(default)]
    pub scope: String,
    /// Whether the network is internal-only.
    #[serde(default)]
    pub internal: bool,
    /// Driver-specific options.
    #[serde(default)]
    pub options: BTreeMap<String, String>,
    /// User-defined labels.
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

const CREATE_RULES: &[SelectionRule] = &[
    SelectionRule {
        class: StatusClass::Forbidden,
        reason: None,
        kind: ErrorKind::NetworkCreateForbidden,
    },
    SelectionRule {
        class: StatusClass::Conflict,
        reason: None,
        kind: ErrorKind::Conflict,
    },
    // Plugin (driver) absent.
    SelectionRule {
        class: StatusClass::NotFound,
        reason: None,
        kind: ErrorKind::NotFound,
    },
];

const INSPECT_RULES: &[SelectionRule] = &[SelectionRule {
    class: StatusClass::NotFound,
    reason: None,
    kind: ErrorKind::NotFound,
}];

// Removing a pre-defined network is refused with a plain 403; unlike create
// there is no narrower member for it.
const REMOVE_RULES: &[SelectionRule] = &[
    SelectionRule {
        class: StatusClass::Forbidden,
        reason: None,
        kind: ErrorKind::Forbidden,
    },
    SelectionRule {
        class: StatusClass::NotFound,
        reason: None,
        kind: ErrorKind::NotFound,
    },
];

const LIST_RULES: &[SelectionRule] = &[];

pub(crate) async fn create(client: &EngineClient, spec: &NetworkSpec) -> Result<NetworkCreated> {
    debug!(target: "dockhand", name = %spec.name, "creating network");
    let response = client.post_json("networks/create", &[], spec).await?;
    if response.status().is_success() {
        client.read_json(response, "network create response").await
    } else {
        Err(client.classify_failure(response, CREATE_RULES).await)
    }
}

pub(crate) async fn inspect(client: &EngineClient, id: &str) -> Result<Network> {
    debug!(target: "dockhand", id, "inspecting network");
    let response = client.get(&format!("networks/{id}")).await?;
    if response.status().is_success() {
        client.read_json(response, "network inspect response").await
    } else {
        Err(client.classify_failure(response, INSPECT_RULES).await)
    }
}

pub(crate) async fn remove(client: &EngineClient, id: &str) -> Result<()> {
    debug!(target: "dockhand", id, "removing network");
    let response = client.delete(&format!("networks/{id}"), &[]).await?;
    if response.status().is_success() {
        client.drain(response).await
    } else {
        Err(client.classify_failure(response, REMOVE_RULES).await)
    }
}

pub(crate) async fn list(client: &EngineClient) -> Result<Vec<Network>> {
    debug!(target: "dockhand", "listing networks");
    let response = client.get("networks").await?;
    if response.status().is_success() {
        client.read_json(response, "network list response").await
    } else {
        Err(client.classify_failure(response, LIST_RULES).await)
    }
}
