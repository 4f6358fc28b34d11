//! Drives `ZapConnectClient` against an in-process Axum server standing in
//! for the intake API.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use assert_matches::assert_matches;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use zaprelay_core::order::UpstreamOrder;
use zaprelay_core::partner::{transform, SellerIdentity, TransformedOrder};
use zaprelay_core::pipeline::{ForwardOutcome, OrderSink};
use zaprelay_zapconnect::{ZapConnectClient, ZapConnectConfig};

#[derive(Clone)]
struct Fake {
    status: StatusCode,
    body: String,
    received: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

async fn intake(State(fake): State<Fake>, headers: HeaderMap, Json(order): Json<Value>) -> (StatusCode, String) {
    let key = headers
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    fake.received.lock().unwrap().push((key, order));
    (fake.status, fake.body.clone())
}

type Received = Arc<Mutex<Vec<(Option<String>, Value)>>>;

async fn serve(status: StatusCode, body: &str) -> (ZapConnectClient, Received) {
    let received: Received = Arc::default();
    let app = Router::new().route("/orders", post(intake)).with_state(Fake {
        status,
        body: body.to_string(),
        received: Arc::clone(&received),
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (client_for(addr), received)
}

fn client_for(addr: SocketAddr) -> ZapConnectClient {
    let config = ZapConnectConfig {
        api_url: format!("http://{addr}/orders"),
        api_key: "zc_test_key".to_string(),
    };
    ZapConnectClient::new(&config, Duration::from_secs(5)).unwrap()
}

fn sample_order() -> TransformedOrder {
    let upstream = UpstreamOrder {
        id: "gid://shopify/Order/1".to_string(),
        name: "#1001".to_string(),
        ..Default::default()
    };
    transform(&upstream, &SellerIdentity::default())
}

#[tokio::test]
async fn accepted_order_returns_response_body() {
    let (client, received) = serve(StatusCode::CREATED, r#"{"awb": "ZC123"}"#).await;

    let outcome = client.forward(&sample_order()).await;

    assert_eq!(
        outcome,
        ForwardOutcome::Success {
            response: json!({"awb": "ZC123"})
        }
    );

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    let (key, body) = &received[0];
    assert_eq!(key.as_deref(), Some("zc_test_key"));
    assert_eq!(body["seller_orderid"], "gid://shopify/Order/1");
    assert_eq!(body["seller_ordernumber"], "#1001");
    assert!(body["products"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn non_json_success_body_is_kept_as_text() {
    let (client, _) = serve(StatusCode::OK, "queued").await;

    assert_eq!(
        client.post_order(&sample_order()).await,
        ForwardOutcome::Success {
            response: json!("queued")
        }
    );
}

#[tokio::test]
async fn error_status_is_rejected_with_body() {
    let (client, _) = serve(StatusCode::UNPROCESSABLE_ENTITY, "invalid pincode").await;

    assert_matches!(
        client.forward(&sample_order()).await,
        ForwardOutcome::Rejected { status_code: 422, body } if body == "invalid pincode"
    );
}

#[tokio::test]
async fn unreachable_endpoint_is_reported_not_raised() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(addr);

    assert_matches!(
        client.forward(&sample_order()).await,
        ForwardOutcome::Unreachable { message } if !message.is_empty()
    );
}
