use zaprelay_core::error::{format_graphql_errors, CoreError};

/// Errors from the Shopify Admin API layer.
#[derive(Debug, thiserror::Error)]
pub enum ShopifyError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Shopify returned a non-2xx status code.
    #[error("Shopify API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The query was rejected at the GraphQL level.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<serde_json::Value>),

    /// A successful response without `data.orders`.
    #[error("Response has no data.orders field")]
    MissingOrders,

    /// The body was not the JSON shape we asked for.
    #[error("Unexpected response body: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configured shop does not form a valid endpoint URL.
    #[error("Invalid Shopify endpoint '{0}'")]
    InvalidEndpoint(String),
}

impl From<ShopifyError> for CoreError {
    fn from(err: ShopifyError) -> Self {
        match err {
            ShopifyError::Request(e) => CoreError::UpstreamUnavailable {
                message: e.to_string(),
                status: None,
                body: None,
            },
            ShopifyError::ApiError { status, body } => CoreError::UpstreamUnavailable {
                message: format!("Shopify returned HTTP {status}"),
                status: Some(status),
                body: Some(body),
            },
            ShopifyError::GraphQL(errors) => CoreError::UpstreamQuery(errors),
            ShopifyError::MissingOrders => {
                CoreError::UpstreamShape("response has no data.orders field".to_string())
            }
            ShopifyError::Parse(e) => CoreError::UpstreamShape(e.to_string()),
            ShopifyError::InvalidEndpoint(endpoint) => {
                CoreError::Internal(format!("invalid Shopify endpoint '{endpoint}'"))
            }
        }
    }
}
