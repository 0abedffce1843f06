use std::time::Duration;

use panel_bridge::{HostTransport, ReqwestTransport, TransportError, TransportSettings};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport_for(server: &MockServer) -> ReqwestTransport {
    ReqwestTransport::new(TransportSettings {
        base_url: server.uri(),
        resource_name: "image_rotator".to_string(),
        ..TransportSettings::default()
    })
    .expect("client")
}

#[tokio::test]
async fn save_settings_posts_json_to_resource_path() {
    let server = MockServer::start().await;
    let body = json!({
        "enabled": true,
        "rotationSeconds": 30,
        "urls": ["https://a.example/1.png", "https://a.example/2.png"]
    });
    Mock::given(method("POST"))
        .and(path("/image_rotator/saveSettings"))
        .and(header("content-type", "application/json; charset=UTF-8"))
        .and(body_json(body.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport_for(&server);
    transport
        .post_event("saveSettings", &body)
        .await
        .expect("save ok");
}

#[tokio::test]
async fn close_posts_empty_object() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/image_rotator/close"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport_for(&server);
    transport.post_event("close", &json!({})).await.expect("close ok");
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/image_rotator/saveSettings"))
        .respond_with(ResponseTemplate::new(500).set_body_string("{\"ok\":true}"))
        .mount(&server)
        .await;

    let transport = transport_for(&server);
    let err = transport
        .post_event("saveSettings", &json!({}))
        .await
        .unwrap_err();
    assert_eq!(err, TransportError::Status(500));
}

#[tokio::test]
async fn unknown_callback_maps_to_status_error() {
    let server = MockServer::start().await;

    let transport = transport_for(&server);
    let err = transport.post_event("close", &json!({})).await.unwrap_err();
    assert_eq!(err, TransportError::Status(404));
}

#[tokio::test]
async fn slow_host_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/image_rotator/close"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(250)))
        .mount(&server)
        .await;

    let transport = ReqwestTransport::new(TransportSettings {
        base_url: server.uri(),
        resource_name: "image_rotator".to_string(),
        request_timeout: Duration::from_millis(50),
    })
    .expect("client");

    let err = transport.post_event("close", &json!({})).await.unwrap_err();
    assert!(matches!(err, TransportError::Timeout(_)), "got {err:?}");
}

#[tokio::test]
async fn unreachable_host_is_a_network_error() {
    let transport = ReqwestTransport::new(TransportSettings {
        base_url: "http://127.0.0.1:1".to_string(),
        ..TransportSettings::default()
    })
    .expect("client");

    let err = transport.post_event("close", &json!({})).await.unwrap_err();
    assert!(matches!(err, TransportError::Network(_)), "got {err:?}");
}
