// SPDX-License-Identifier: MIT OR Apache-2.0
//! Image operations against a mock engine.

use dockhand_client::images::ImageRef;
use dockhand_client::{EngineClient, EngineConfig, EngineError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> EngineClient {
    EngineClient::new(&EngineConfig::new(server.uri())).expect("valid config")
}

#[tokio::test]
async fn pull_drains_the_progress_stream() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/images/create"))
        .and(query_param("fromImage", "alpine"))
        .and(query_param("tag", "3.20"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "{\"status\":\"Pulling from library/alpine\"}\n{\"status\":\"Download complete\"}\n",
        ))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .pull_image(&ImageRef::new("alpine").with_tag("3.20"))
        .await
        .expect("pull");
}

#[tokio::test]
async fn pulling_an_unknown_repository_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/images/create"))
        .respond_with(ResponseTemplate::new(404).set_body_string(
            r#"{"message":"pull access denied for ghost, repository does not exist"}"#,
        ))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .pull_image(&ImageRef::new("ghost"))
        .await
        .expect_err("unknown repository");
    assert!(matches!(err, EngineError::NotFound(_)), "got {err:?}");
}

#[tokio::test]
async fn inspect_returns_descriptor() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/images/alpine/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"Id":"sha256:abc","RepoTags":["alpine:3.20"],"Size":7340032}"#,
        ))
        .mount(&server)
        .await;

    let image = client_for(&server)
        .inspect_image("alpine")
        .await
        .expect("inspect");
    assert_eq!(image.id, "sha256:abc");
    assert_eq!(image.repo_tags, vec!["alpine:3.20"]);
}

#[tokio::test]
async fn remove_returns_delete_report() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/images/alpine"))
        .and(query_param("force", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"[{"Untagged":"alpine:3.20"},{"Deleted":"sha256:abc"}]"#,
        ))
        .mount(&server)
        .await;

    let report = client_for(&server)
        .remove_image("alpine", false)
        .await
        .expect("remove");
    assert_eq!(report.len(), 2);
    assert_eq!(report[0].untagged.as_deref(), Some("alpine:3.20"));
}

#[tokio::test]
async fn removing_an_image_in_use_is_conflict() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/images/alpine"))
        .respond_with(ResponseTemplate::new(409).set_body_string(
            r#"{"message":"conflict: unable to remove repository reference \"alpine\""}"#,
        ))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .remove_image("alpine", false)
        .await
        .expect_err("image in use");
    assert!(matches!(err, EngineError::Conflict(_)), "got {err:?}");
}
