//! REST client for the ZapConnect order intake endpoint.

use std::time::Duration;

use async_trait::async_trait;
use zaprelay_core::partner::TransformedOrder;
use zaprelay_core::pipeline::{ForwardOutcome, OrderSink};

/// Header carrying the ZapConnect API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Endpoint and credential for the intake API.
#[derive(Debug, Clone)]
pub struct ZapConnectConfig {
    pub api_url: String,
    pub api_key: String,
}

/// Construction errors. Forwarding itself never fails; see [`ForwardOutcome`].
#[derive(Debug, thiserror::Error)]
pub enum ZapConnectError {
    /// The configured URL does not parse.
    #[error("Invalid ZapConnect API URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Order sink backed by the ZapConnect REST API.
pub struct ZapConnectClient {
    client: reqwest::Client,
    api_url: reqwest::Url,
    api_key: String,
}

impl ZapConnectClient {
    /// Create a client with its own connection pool and request timeout.
    pub fn new(config: &ZapConnectConfig, timeout: Duration) -> Result<Self, ZapConnectError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Self::with_client(client, config)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        config: &ZapConnectConfig,
    ) -> Result<Self, ZapConnectError> {
        let api_url =
            reqwest::Url::parse(&config.api_url).map_err(|e| ZapConnectError::InvalidUrl {
                url: config.api_url.clone(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            client,
            api_url,
            api_key: config.api_key.clone(),
        })
    }

    /// POST one order as JSON.
    pub async fn post_order(&self, order: &TransformedOrder) -> ForwardOutcome {
        let result = self
            .client
            .post(self.api_url.clone())
            .header(API_KEY_HEADER, &self.api_key)
            .json(order)
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(order_id = %order.seller_orderid, error = %e, "ZapConnect unreachable");
                return ForwardOutcome::Unreachable {
                    message: e.to_string(),
                };
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) if status.is_success() => {
                // Accepted, but the body could not be read.
                tracing::warn!(order_id = %order.seller_orderid, error = %e, "Unreadable ZapConnect response body");
                String::new()
            }
            Err(_) => "<unreadable body>".to_string(),
        };

        if !status.is_success() {
            tracing::warn!(
                order_id = %order.seller_orderid,
                status = status.as_u16(),
                "ZapConnect rejected order"
            );
            return ForwardOutcome::Rejected {
                status_code: status.as_u16(),
                body,
            };
        }

        ForwardOutcome::Success {
            response: parse_body(body),
        }
    }
}

/// JSON bodies are kept as JSON; anything else is wrapped as a string.
fn parse_body(body: String) -> serde_json::Value {
    if body.trim().is_empty() {
        return serde_json::Value::Null;
    }
    serde_json::from_str(&body).unwrap_or(serde_json::Value::String(body))
}

#[async_trait]
impl OrderSink for ZapConnectClient {
    async fn forward(&self, order: &TransformedOrder) -> ForwardOutcome {
        self.post_order(order).await
    }
}
