#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use zaprelay_api::config::{RelayConfig, ServerConfig};
use zaprelay_api::router::build_app_router;
use zaprelay_api::state::{AppState, Connector};
use zaprelay_core::error::CoreError;
use zaprelay_core::ledger::DedupLedger;
use zaprelay_core::order::{Customer, Money, UpstreamOrder};
use zaprelay_core::partner::{SellerIdentity, TransformedOrder};
use zaprelay_core::pipeline::{ForwardOutcome, OrderSink, OrderSource};

/// Build a test `ServerConfig` with safe defaults.
///
/// Credentials are left empty; tests inject the source and sink directly.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        http_client_timeout_secs: 5,
        relay: RelayConfig {
            shopify_shop: None,
            shopify_access_token: None,
            shopify_api_version: "2025-01".to_string(),
            page_size: 10,
            zapconnect_api_url: None,
            zapconnect_api_key: None,
            seller: SellerIdentity::default(),
        },
    }
}

// ---------------------------------------------------------------------------
// Stub collaborators
// ---------------------------------------------------------------------------

type FetchFn = dyn Fn() -> Result<Vec<UpstreamOrder>, CoreError> + Send + Sync;

/// Answers every fetch by calling `respond`.
pub struct StubSource {
    respond: Box<FetchFn>,
    limits: Mutex<Vec<u32>>,
}

impl StubSource {
    pub fn orders(orders: Vec<UpstreamOrder>) -> Self {
        Self::responding(move || Ok(orders.clone()))
    }

    pub fn responding(
        respond: impl Fn() -> Result<Vec<UpstreamOrder>, CoreError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            respond: Box::new(respond),
            limits: Mutex::default(),
        }
    }

    /// Page sizes requested so far.
    pub fn limits(&self) -> Vec<u32> {
        self.limits.lock().unwrap().clone()
    }
}

#[async_trait]
impl OrderSource for StubSource {
    async fn fetch_recent_orders(&self, limit: u32) -> Result<Vec<UpstreamOrder>, CoreError> {
        self.limits.lock().unwrap().push(limit);
        (self.respond)()
    }
}

/// Replays scripted outcomes (then succeeds) and records what it received.
#[derive(Default)]
pub struct RecordingSink {
    script: Mutex<VecDeque<ForwardOutcome>>,
    received: Mutex<Vec<TransformedOrder>>,
}

impl RecordingSink {
    pub fn then(self, outcome: ForwardOutcome) -> Self {
        self.script.lock().unwrap().push_back(outcome);
        self
    }

    /// Ids of every order forwarded so far, in call order.
    pub fn forwarded_ids(&self) -> Vec<String> {
        self.received
            .lock()
            .unwrap()
            .iter()
            .map(|o| o.seller_orderid.clone())
            .collect()
    }
}

#[async_trait]
impl OrderSink for RecordingSink {
    async fn forward(&self, order: &TransformedOrder) -> ForwardOutcome {
        self.received.lock().unwrap().push(order.clone());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| ForwardOutcome::Success {
                response: serde_json::json!({"status": "accepted"}),
            })
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn upstream_order(n: u32) -> UpstreamOrder {
    UpstreamOrder {
        id: format!("gid://shopify/Order/{n}"),
        name: format!("#{}", 1000 + n),
        total: Some(Money {
            amount: Some("499.00".to_string()),
            currency_code: Some("INR".to_string()),
        }),
        customer: Some(Customer {
            first_name: Some("Asha".to_string()),
            last_name: Some("Rao".to_string()),
            email: Some("asha@example.com".to_string()),
        }),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// App builders
// ---------------------------------------------------------------------------

/// Build the full application router around the given collaborators.
///
/// Uses the same middleware stack as `main.rs` via [`build_app_router`].
pub fn build_test_app(
    source: Arc<StubSource>,
    sink: Arc<RecordingSink>,
) -> (Router, Arc<DedupLedger>) {
    let source: Arc<dyn OrderSource> = source;
    let sink: Arc<dyn OrderSink> = sink;
    build_with(Connector::Ready(source), Connector::Ready(sink))
}

/// Build the router with neither collaborator configured.
pub fn build_unconfigured_app() -> Router {
    let config = test_config();
    let source = Connector::Missing(config.relay.shopify().unwrap_err());
    let sink = Connector::Missing(config.relay.zapconnect().unwrap_err());
    build_with(source, sink).0
}

fn build_with(
    source: Connector<dyn OrderSource>,
    sink: Connector<dyn OrderSink>,
) -> (Router, Arc<DedupLedger>) {
    let config = test_config();
    let ledger = Arc::new(DedupLedger::new());
    let state = AppState {
        config: Arc::new(config.clone()),
        ledger: Arc::clone(&ledger),
        source,
        sink,
    };
    (build_app_router(state, &config), ledger)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, method: Method, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri).await
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
