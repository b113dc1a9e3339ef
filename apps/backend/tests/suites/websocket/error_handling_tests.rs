// Malformed frames and unsupported payloads

use std::time::Duration;

use backend_test_support::ws_client::{ClientError, WebSocketClient};
use serde_json::json;

use crate::support::session::WAIT;
use crate::support::start_test_server;
use crate::support::test_config;

#[tokio::test]
async fn malformed_json_gets_error_and_keeps_connection() -> Result<(), ClientError> {
    let server = start_test_server(test_config()).await?;
    let mut client = WebSocketClient::connect_retry(&server.ws_url("malformed"), WAIT).await?;

    client.send_text("{not json").await?;
    let error = client.recv_until_type("error", WAIT).await?;
    assert_eq!(error["code"], "BAD_REQUEST");

    client
        .send_json(&json!({ "type": "teleport", "token": "x" }))
        .await?;
    let error = client.recv_until_type("error", WAIT).await?;
    assert_eq!(error["code"], "BAD_REQUEST");

    // Still usable afterwards.
    client
        .send_json(&json!({ "type": "register", "name": "ana" }))
        .await?;
    let registered = client.recv_until_type("registered", WAIT).await?;
    assert_eq!(registered["name"], "ana");

    server.stop().await;
    Ok(())
}

#[tokio::test]
async fn binary_frame_closes_connection() -> Result<(), ClientError> {
    let server = start_test_server(test_config()).await?;
    let mut client = WebSocketClient::connect_retry(&server.ws_url("binary"), WAIT).await?;

    client.send_binary(vec![1, 2, 3]).await?;
    let error = client.recv_until_type("error", WAIT).await?;
    assert_eq!(error["code"], "BAD_REQUEST");
    assert!(client.closed_within(Duration::from_secs(2)).await);

    server.stop().await;
    Ok(())
}

#[tokio::test]
async fn empty_room_is_released() -> Result<(), ClientError> {
    let server = start_test_server(test_config()).await?;
    let mut client = WebSocketClient::connect_retry(&server.ws_url("ephemeral"), WAIT).await?;
    client.recv_until_type("roster_update", WAIT).await?;
    assert_eq!(server.state.hub.active_rooms(), 1);

    client.close().await?;

    let deadline = tokio::time::Instant::now() + WAIT;
    while server.state.hub.active_rooms() > 0 {
        assert!(
            tokio::time::Instant::now() < deadline,
            "room still registered after its last session left"
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    server.stop().await;
    Ok(())
}
