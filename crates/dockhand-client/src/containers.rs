// SPDX-License-Identifier: MIT OR Apache-2.0
//! Container resource operations.

use std::collections::BTreeMap;

use dockhand_error::{ErrorKind, SelectionRule, StatusClass};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Result;
use crate::client::EngineClient;

/// Specification for a container to create.
///
/// The name travels in the query string, not the body, so it is skipped
/// during body serialization.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContainerSpec {
    /// Optional container name; the engine generates one when absent.
    #[serde(skip)]
    pub name: Option<String>,
    /// Image reference to run.
    pub image: String,
    /// Command override.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cmd: Vec<String>,
    /// Environment entries, `KEY=value` form.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<String>,
    /// User-defined labels.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

impl ContainerSpec {
    /// Spec running the given image with engine defaults for everything else.
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            name: None,
            image: image.into(),
            cmd: Vec::new(),
            env: Vec::new(),
            labels: BTreeMap::new(),
        }
    }

    /// Request a fixed container name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// The engine's answer to a successful create.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContainerCreated {
    /// Id of the created container.
    pub id: String,
    /// Advisory warnings.
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Container descriptor as returned by inspect.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Container {
    /// Container id.
    pub id: String,
    /// Container name (engine-prefixed with `/`).
    #[serde(default)]
    pub name: String,
    /// Image the container was created from.
    #[serde(default)]
    pub image: String,
    /// Runtime state.
    #[serde(default)]
    pub state: ContainerState,
}

/// Runtime state of a container.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContainerState {
    /// Engine status string (`created`, `running`, `exited`, ...).
    #[serde(default)]
    pub status: String,
    /// Whether the container is currently running.
    #[serde(default)]
    pub running: bool,
    /// Exit code of the last run.
    #[serde(default)]
    pub exit_code: i64,
}

/// Options for removing a container.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveContainerOptions {
    /// Kill a running container instead of refusing.
    pub force: bool,
    /// Also remove anonymous volumes.
    pub volumes: bool,
}

const CREATE_RULES: &[SelectionRule] = &[
    // Image absent locally.
    SelectionRule {
        class: StatusClass::NotFound,
        reason: None,
        kind: ErrorKind::NotFound,
    },
    // Name already taken.
    SelectionRule {
        class: StatusClass::Conflict,
        reason: None,
        kind: ErrorKind::Conflict,
    },
];

const INSPECT_RULES: &[SelectionRule] = &[SelectionRule {
    class: StatusClass::NotFound,
    reason: None,
    kind: ErrorKind::NotFound,
}];

const REMOVE_RULES: &[SelectionRule] = &[
    SelectionRule {
        class: StatusClass::NotFound,
        reason: None,
        kind: ErrorKind::NotFound,
    },
    // Still running and force was not set.
    SelectionRule {
        class: StatusClass::Conflict,
        reason: None,
        kind: ErrorKind::Conflict,
    },
];

pub(crate) async fn create(
    client: &EngineClient,
    spec: &ContainerSpec,
) -> Result<ContainerCreated> {
    debug!(target: "dockhand", image = %spec.image, name = ?spec.name, "creating container");
    let mut query: Vec<(&str, &str)> = Vec::new();
    if let Some(name) = &spec.name {
        query.push(("name", name));
    }
    let response = client.post_json("containers/create", &query, spec).await?;
    if response.status().is_success() {
        client
            .read_json(response, "container create response")
            .await
    } else {
        Err(client.classify_failure(response, CREATE_RULES).await)
    }
}

pub(crate) async fn inspect(client: &EngineClient, id: &str) -> Result<Container> {
    debug!(target: "dockhand", id, "inspecting container");
    let response = client.get(&format!("containers/{id}/json")).await?;
    if response.status().is_success() {
        client
            .read_json(response, "container inspect response")
            .await
    } else {
        Err(client.classify_failure(response, INSPECT_RULES).await)
    }
}

pub(crate) async fn remove(
    client: &EngineClient,
    id: &str,
    options: &RemoveContainerOptions,
) -> Result<()> {
    debug!(target: "dockhand", id, force = options.force, "removing container");
    let force = if options.force { "true" } else { "false" };
    let volumes = if options.volumes { "true" } else { "false" };
    let query = [("force", force), ("v", volumes)];
    let response = client
        .delete(&format!("containers/{id}"), &query)
        .await?;
    if response.status().is_success() {
        client.drain(response).await
    } else {
        Err(client.classify_failure(response, REMOVE_RULES).await)
    }
}
