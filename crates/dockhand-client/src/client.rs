// SPDX-License-Identifier: MIT OR Apache-2.0
//! The engine client: transport ownership and request plumbing.

use std::collections::BTreeMap;

use dockhand_error::{EngineError, SelectionRule, select};
use dockhand_wire::{TransportSnapshot, WireErrorResponse};
use reqwest::{Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::{ConfigError, EngineConfig};
use crate::containers::{Container, ContainerCreated, ContainerSpec, RemoveContainerOptions};
use crate::images::{Image, ImageDeleted, ImageRef};
use crate::networks::{Network, NetworkCreated, NetworkSpec};
use crate::{Result, containers, images, networks};

/// Stateless client for the engine control plane.
///
/// Holds the pooled HTTP transport and the resolved base URL; everything
/// else lives per call. Cloning is cheap and concurrent use is safe; no
/// call mutates client state.
#[derive(Debug, Clone)]
pub struct EngineClient {
    http: reqwest::Client,
    base: Url,
}

impl EngineClient {
    /// Validate the config and build the transport.
    pub fn new(config: &EngineConfig) -> std::result::Result<Self, ConfigError> {
        if config.timeout.is_zero() || config.connect_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        let mut base =
            Url::parse(&config.base_address).map_err(|e| ConfigError::InvalidBaseAddress {
                address: config.base_address.clone(),
                reason: e.to_string(),
            })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseAddress {
                address: config.base_address.clone(),
                reason: format!("unsupported scheme '{}'", base.scheme()),
            });
        }
        if let Some(version) = &config.api_version {
            // Versioned engine APIs prefix every path: /v1.43/networks/...
            let prefix = format!("{}/{}/", base.path().trim_end_matches('/'), version);
            base.set_path(&prefix);
        }
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(ConfigError::Transport)?;
        Ok(Self { http, base })
    }

    // ── Resource operations ──────────────────────────────────────────

    /// Create a network from the given specification.
    pub async fn create_network(&self, spec: &NetworkSpec) -> Result<NetworkCreated> {
        networks::create(self, spec).await
    }

    /// Inspect a network by id or name.
    pub async fn inspect_network(&self, id: &str) -> Result<Network> {
        networks::inspect(self, id).await
    }

    /// Remove a network by id or name.
    pub async fn remove_network(&self, id: &str) -> Result<()> {
        networks::remove(self, id).await
    }

    /// List all networks known to the engine.
    pub async fn list_networks(&self) -> Result<Vec<Network>> {
        networks::list(self).await
    }

    /// Create a container from the given specification.
    pub async fn create_container(&self, spec: &ContainerSpec) -> Result<ContainerCreated> {
        containers::create(self, spec).await
    }

    /// Inspect a container by id or name.
    pub async fn inspect_container(&self, id: &str) -> Result<Container> {
        containers::inspect(self, id).await
    }

    /// Remove a container by id or name.
    pub async fn remove_container(&self, id: &str, options: &RemoveContainerOptions) -> Result<()> {
        containers::remove(self, id, options).await
    }

    /// Pull an image from its registry, draining the progress stream.
    pub async fn pull_image(&self, image: &ImageRef) -> Result<()> {
        images::pull(self, image).await
    }

    /// Inspect an image by name or id.
    pub async fn inspect_image(&self, name: &str) -> Result<Image> {
        images::inspect(self, name).await
    }

    /// Remove an image by name or id.
    pub async fn remove_image(&self, name: &str, force: bool) -> Result<Vec<ImageDeleted>> {
        images::remove(self, name, force).await
    }

    // ── Request plumbing (used by the resource modules) ──────────────

    fn url(&self, path: &str) -> Result<Url> {
        // Paths are relative ("networks/create") so the version prefix in
        // the base survives the join.
        self.base
            .join(path)
            .map_err(|e| EngineError::unreachable_from(format!("invalid request path {path}"), e))
    }

    pub(crate) async fn get(&self, path: &str) -> Result<Response> {
        let url = self.url(path)?;
        self.dispatch(self.http.get(url)).await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        body: &B,
    ) -> Result<Response> {
        let url = self.url(path)?;
        self.dispatch(self.http.post(url).query(query).json(body))
            .await
    }

    pub(crate) async fn post(&self, path: &str, query: &[(&str, &str)]) -> Result<Response> {
        let url = self.url(path)?;
        self.dispatch(self.http.post(url).query(query)).await
    }

    pub(crate) async fn delete(&self, path: &str, query: &[(&str, &str)]) -> Result<Response> {
        let url = self.url(path)?;
        self.dispatch(self.http.delete(url).query(query)).await
    }

    /// One network round trip. Any failure to obtain a response (connect
    /// refusal, timeout, protocol breakage) is `Unreachable`; a response
    /// with any status is handed back for classification.
    async fn dispatch(&self, request: reqwest::RequestBuilder) -> Result<Response> {
        request.send().await.map_err(|e| {
            let message = if e.is_timeout() {
                "engine did not respond within the configured timeout"
            } else if e.is_connect() {
                "failed to connect to the engine"
            } else {
                "transport failure before a response was obtained"
            };
            EngineError::unreachable_from(message, e)
        })
    }

    /// Success path: decode the body into the typed resource value.
    pub(crate) async fn read_json<T: DeserializeOwned>(
        &self,
        response: Response,
        context: &'static str,
    ) -> Result<T> {
        let body = self.read_body(response).await?;
        serde_json::from_slice(&body).map_err(|e| EngineError::decode(format!("{context}: {e}")))
    }

    /// Success path for operations whose body carries nothing of interest
    /// (deletes, progress streams): read it to completion and discard it.
    pub(crate) async fn drain(&self, response: Response) -> Result<()> {
        self.read_body(response).await.map(|_| ())
    }

    /// Failure path: capture the snapshot, parse the wire payload, and let
    /// the operation's selection table pick the taxonomy member.
    pub(crate) async fn classify_failure(
        &self,
        response: Response,
        rules: &[SelectionRule],
    ) -> EngineError {
        let status = response.status().as_u16();
        let headers = header_map(&response);
        let body = match response.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            // The response never completed, so there is nothing coherent to
            // snapshot; this is a transport failure, not an engine verdict.
            Err(e) => {
                return EngineError::unreachable_from(
                    "connection lost while reading the error body",
                    e,
                );
            }
        };
        let wire = match WireErrorResponse::parse(&body) {
            Ok(wire) => Some(wire),
            Err(e) => {
                debug!(target: "dockhand", status, error = %e, "engine error body did not parse");
                None
            }
        };
        let transport = TransportSnapshot::new(status, headers, body);
        select(rules, wire, transport)
    }

    async fn read_body(&self, response: Response) -> Result<Vec<u8>> {
        debug_assert!(response.status().is_success());
        response
            .bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|e| {
                EngineError::unreachable_from("connection lost while reading the response body", e)
            })
    }
}

fn header_map(response: &Response) -> BTreeMap<String, String> {
    response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_owned(), v.to_owned()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn rejects_unparseable_base_address() {
        let config = EngineConfig::new("not a url");
        assert!(matches!(
            EngineClient::new(&config),
            Err(ConfigError::InvalidBaseAddress { .. })
        ));
    }

    #[test]
    fn rejects_non_http_scheme() {
        let config = EngineConfig::new("unix:///var/run/engine.sock");
        assert!(matches!(
            EngineClient::new(&config),
            Err(ConfigError::InvalidBaseAddress { .. })
        ));
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = EngineConfig::default().with_timeout(Duration::ZERO);
        assert!(matches!(
            EngineClient::new(&config),
            Err(ConfigError::ZeroTimeout)
        ));
    }

    #[test]
    fn version_prefix_lands_in_every_url() {
        let config = EngineConfig::new("http://localhost:2375").with_api_version("v1.43");
        let client = EngineClient::new(&config).unwrap();
        let url = client.url("networks/create").unwrap();
        assert_eq!(url.path(), "/v1.43/networks/create");
    }

    #[test]
    fn unversioned_urls_are_rooted() {
        let client = EngineClient::new(&EngineConfig::default()).unwrap();
        let url = client.url("containers/create").unwrap();
        assert_eq!(url.path(), "/containers/create");
    }
}
