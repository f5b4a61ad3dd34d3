// SPDX-License-Identifier: MIT OR Apache-2.0
//! Transport-level failure handling: unreachable engines, timeouts, and
//! undecodable success bodies.

use std::time::Duration;

use dockhand_client::networks::NetworkSpec;
use dockhand_client::{EngineClient, EngineConfig, EngineError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn refused_connection_is_unreachable_with_no_attachments() {
    // Nothing listens on the discard port.
    let config = EngineConfig::new("http://127.0.0.1:9")
        .with_connect_timeout(Duration::from_millis(250))
        .with_timeout(Duration::from_secs(1));
    let client = EngineClient::new(&config).expect("valid config");

    let err = client
        .create_network(&NetworkSpec::new("app-net"))
        .await
        .expect_err("no engine there");

    assert!(matches!(err, EngineError::Unreachable { .. }), "got {err:?}");
    assert!(err.wire_error().is_none());
    assert!(err.transport().is_none());
    assert_eq!(err.status_code(), None);
}

#[tokio::test]
async fn timeout_is_unreachable_never_a_partial_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/networks/create"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_string(r#"{"Id":"late"}"#)
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let config = EngineConfig::new(server.uri()).with_timeout(Duration::from_millis(100));
    let client = EngineClient::new(&config).expect("valid config");

    let err = client
        .create_network(&NetworkSpec::new("app-net"))
        .await
        .expect_err("response arrives too late");

    assert!(matches!(err, EngineError::Unreachable { .. }), "got {err:?}");
    assert!(err.transport().is_none());
}

#[tokio::test]
async fn undecodable_success_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/networks/create"))
        .respond_with(ResponseTemplate::new(201).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = EngineClient::new(&EngineConfig::new(server.uri())).expect("valid config");
    let err = client
        .create_network(&NetworkSpec::new("app-net"))
        .await
        .expect_err("success status, broken body");

    match &err {
        EngineError::Decode { message } => {
            assert!(message.contains("network create response"), "{message}");
        }
        other => panic!("expected Decode, got {other:?}"),
    }
    // A decode failure is not an engine verdict; no snapshot is attached.
    assert!(err.transport().is_none());
}

#[tokio::test]
async fn api_version_prefix_is_applied() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1.43/networks/create"))
        .respond_with(ResponseTemplate::new(201).set_body_string(r#"{"Id":"net-1"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let config = EngineConfig::new(server.uri()).with_api_version("v1.43");
    let client = EngineClient::new(&config).expect("valid config");
    let created = client
        .create_network(&NetworkSpec::new("app-net"))
        .await
        .expect("create under version prefix");
    assert_eq!(created.id, "net-1");
}

#[tokio::test]
async fn concurrent_calls_do_not_interfere() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/networks/app-net"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"Id":"n1","Name":"app-net"}"#),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/networks/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"message":"not found"}"#))
        .mount(&server)
        .await;

    let client = EngineClient::new(&EngineConfig::new(server.uri())).expect("valid config");
    let (ok, missing) = tokio::join!(
        client.inspect_network("app-net"),
        client.inspect_network("ghost"),
    );
    assert_eq!(ok.expect("present").id, "n1");
    assert!(matches!(
        missing.expect_err("absent"),
        EngineError::NotFound(_)
    ));
}
