//! HTTP client for the Shopify Admin GraphQL endpoint.

use std::time::Duration;

use async_trait::async_trait;
use zaprelay_core::error::CoreError;
use zaprelay_core::order::UpstreamOrder;
use zaprelay_core::pipeline::OrderSource;

use crate::error::ShopifyError;
use crate::query::recent_orders_query;
use crate::wire::parse_orders_response;

/// Header carrying the Admin API access token.
pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Admin API version used when none is configured.
pub const DEFAULT_API_VERSION: &str = "2025-01";

/// Connection settings for one shop.
#[derive(Debug, Clone)]
pub struct ShopifyConfig {
    /// Shop domain, e.g. `my-store.myshopify.com`. A value with an explicit
    /// `http://` or `https://` scheme is used as the base URL verbatim.
    pub shop: String,
    pub access_token: String,
    pub api_version: String,
}

impl ShopifyConfig {
    /// `https://{shop}/admin/api/{version}/graphql.json`
    pub fn graphql_endpoint(&self) -> String {
        let base = if self.shop.starts_with("http://") || self.shop.starts_with("https://") {
            self.shop.trim_end_matches('/').to_string()
        } else {
            format!("https://{}", self.shop.trim_end_matches('/'))
        };
        format!("{base}/admin/api/{}/graphql.json", self.api_version)
    }
}

/// Order source backed by the Shopify Admin GraphQL API.
pub struct ShopifyClient {
    client: reqwest::Client,
    endpoint: reqwest::Url,
    access_token: String,
}

impl ShopifyClient {
    /// Create a client with its own connection pool and request timeout.
    pub fn new(config: &ShopifyConfig, timeout: Duration) -> Result<Self, ShopifyError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Self::with_client(client, config)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: &ShopifyConfig) -> Result<Self, ShopifyError> {
        let endpoint = config.graphql_endpoint();
        let endpoint = reqwest::Url::parse(&endpoint)
            .map_err(|_| ShopifyError::InvalidEndpoint(endpoint.clone()))?;
        Ok(Self {
            client,
            endpoint,
            access_token: config.access_token.clone(),
        })
    }

    pub fn endpoint(&self) -> &reqwest::Url {
        &self.endpoint
    }

    /// Fetch up to `page_size` orders, newest first, in a single request.
    pub async fn query_recent_orders(
        &self,
        page_size: u32,
    ) -> Result<Vec<UpstreamOrder>, ShopifyError> {
        let body = serde_json::json!({ "query": recent_orders_query(page_size) });

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(status = status.as_u16(), "Shopify returned an error status");
            return Err(ShopifyError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        let json: serde_json::Value = serde_json::from_str(&text)?;
        let orders = parse_orders_response(json)?;

        tracing::debug!(count = orders.len(), page_size, "Parsed Shopify orders");
        Ok(orders)
    }
}

#[async_trait]
impl OrderSource for ShopifyClient {
    async fn fetch_recent_orders(&self, limit: u32) -> Result<Vec<UpstreamOrder>, CoreError> {
        Ok(self.query_recent_orders(limit).await?)
    }
}
