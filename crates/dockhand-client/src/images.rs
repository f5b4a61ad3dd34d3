// SPDX-License-Identifier: MIT OR Apache-2.0
//! Image resource operations.

use dockhand_error::{ErrorKind, SelectionRule, StatusClass};
use serde::Deserialize;
use tracing::debug;

use crate::Result;
use crate::client::EngineClient;

/// Reference to an image in a registry.
#[derive(Debug, Clone)]
pub struct ImageRef {
    /// Image name, optionally registry-qualified.
    pub name: String,
    /// Tag; the engine defaults to `latest` when absent.
    pub tag: Option<String>,
}

impl ImageRef {
    /// Reference with the engine's default tag.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: None,
        }
    }

    /// Reference pinned to a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

/// Image descriptor as returned by inspect.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Image {
    /// Image id (content digest).
    pub id: String,
    /// Repository tags pointing at this image.
    #[serde(default)]
    pub repo_tags: Vec<String>,
    /// Size in bytes.
    #[serde(default)]
    pub size: i64,
}

/// One entry of the engine's delete report.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImageDeleted {
    /// A tag that was untagged.
    #[serde(default)]
    pub untagged: Option<String>,
    /// A layer or image that was deleted.
    #[serde(default)]
    pub deleted: Option<String>,
}

const PULL_RULES: &[SelectionRule] = &[
    // Repository or tag absent in the registry.
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

const REMOVE_RULES: &[SelectionRule] = &[
    SelectionRule {
        class: StatusClass::NotFound,
        reason: None,
        kind: ErrorKind::NotFound,
    },
    // Image still referenced by a container.
    SelectionRule {
        class: StatusClass::Conflict,
        reason: None,
        kind: ErrorKind::Conflict,
    },
];

pub(crate) async fn pull(client: &EngineClient, image: &ImageRef) -> Result<()> {
    debug!(target: "dockhand", name = %image.name, tag = ?image.tag, "pulling image");
    let mut query = vec![("fromImage", image.name.as_str())];
    if let Some(tag) = &image.tag {
        query.push(("tag", tag));
    }
    let response = client.post("images/create", &query).await?;
    if response.status().is_success() {
        // The engine streams JSON progress lines; the descriptor, if wanted,
        // comes from a subsequent inspect.
        client.drain(response).await
    } else {
        Err(client.classify_failure(response, PULL_RULES).await)
    }
}

pub(crate) async fn inspect(client: &EngineClient, name: &str) -> Result<Image> {
    debug!(target: "dockhand", name, "inspecting image");
    let response = client.get(&format!("images/{name}/json")).await?;
    if response.status().is_success() {
        client.read_json(response, "image inspect response").await
    } else {
        Err(client.classify_failure(response, INSPECT_RULES).await)
    }
}

pub(crate) async fn remove(
    client: &EngineClient,
    name: &str,
    force: bool,
) -> Result<Vec<ImageDeleted>> {
    debug!(target: "dockhand", name, force, "removing image");
    let force = if force { "true" } else { "false" };
    let response = client
        .delete(&format!("images/{name}"), &[("force", force)])
        .await?;
    if response.status().is_success() {
        client.read_json(response, "image remove response").await
    } else {
        Err(client.classify_failure(response, REMOVE_RULES).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_ref_builders() {
        let image = ImageRef::new("alpine").with_tag("3.20");
        assert_eq!(image.name, "alpine");
        assert_eq!(image.tag.as_deref(), Some("3.20"));
    }

    #[test]
    fn delete_report_deserializes() {
        let report: Vec<ImageDeleted> = serde_json::from_str(
            r#"[{"Untagged":"alpine:3.20"},{"Deleted":"sha256:abc"}]"#,
        )
        .unwrap();
        assert_eq!(report[0].untagged.as_deref(), Some("alpine:3.20"));
        assert_eq!(report[1].deleted.as_deref(), Some("sha256:abc"));
    }

    #[test]
    fn inspect_payload_deserializes() {
        let image: Image =
            serde_json::from_str(r#"{"Id":"sha256:abc","RepoTags":["alpine:3.20"],"Size":7340032}"#)
                .unwrap();
        assert_eq!(image.repo_tags, vec!["alpine:3.20"]);
        assert_eq!(image.size, 7_340_032);
    }
}
