//! Integration tests for the HTTP JSON-RPC transport.
//!
//! A wiremock server stands in for the daemon.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sbtc::rpc::{HttpTransport, RpcEndpoint, RpcError, RpcRequest, RpcTransport};

fn transport_for(server: &MockServer) -> HttpTransport {
    HttpTransport::new(RpcEndpoint {
        host: "127.0.0.1".to_string(),
        port: server.address().port(),
        user: "alice".to_string(),
        password: "secret".to_string(),
    })
}

#[tokio::test]
async fn result_member_is_returned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"result": 812345, "error": null, "id": 0})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let count = transport_for(&server)
        .call(&RpcRequest::new("getblockcount", vec![]))
        .await
        .unwrap();
    assert_eq!(count, json!(812345));
}

#[tokio::test]
async fn request_body_and_auth() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("authorization", "Basic YWxpY2U6c2VjcmV0"))
        .and(header("content-type", "application/json"))
        .and(header("user-agent", "sbtc"))
        .and(body_json(json!({
            "method": "getblockhash",
            "params": [100],
            "jsonrpc": "2.0",
            "id": 0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "00ab"})))
        .expect(1)
        .mount(&server)
        .await;

    let hash = transport_for(&server)
        .call(&RpcRequest::new("getblockhash", vec![json!(100)]))
        .await
        .unwrap();
    assert_eq!(hash, json!("00ab"));
}

#[tokio::test]
async fn error_status_carries_daemon_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "result": null,
            "error": {"code": -5, "message": "Block not found"},
            "id": 0
        })))
        .mount(&server)
        .await;

    let err = transport_for(&server)
        .call(&RpcRequest::new("getblock", vec![json!("00")]))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        RpcError::Status {
            status: 500,
            message: "Block not found".to_string()
        }
    );
    assert_eq!(err.to_string(), "RPCError (HTTP 500): Block not found");
}

#[tokio::test]
async fn status_without_body_gets_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = transport_for(&server)
        .call(&RpcRequest::new("getinfo", vec![]))
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "RPCError (HTTP 401): Error code 401 when connecting via RPC."
    );
}

#[tokio::test]
async fn error_member_on_success_status_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": null,
            "error": {"code": -32601, "message": "Method not found"}
        })))
        .mount(&server)
        .await;

    let err = transport_for(&server)
        .call(&RpcRequest::new("uptime", vec![]))
        .await
        .unwrap_err();
    assert!(matches!(err, RpcError::Status { status: 200, .. }));
}

#[tokio::test]
async fn undecodable_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = transport_for(&server)
        .call(&RpcRequest::new("getinfo", vec![]))
        .await
        .unwrap_err();
    assert!(matches!(err, RpcError::Decode(_)));
}

#[tokio::test]
async fn closed_port_is_a_network_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let transport = HttpTransport::new(RpcEndpoint {
        host: "127.0.0.1".to_string(),
        port,
        user: String::new(),
        password: String::new(),
    });

    let err = transport
        .call(&RpcRequest::new("getinfo", vec![]))
        .await
        .unwrap_err();
    assert!(matches!(err, RpcError::Network(_)));
}
