#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Missing required configuration: {}", .keys.join(", "))]
    ConfigMissing { keys: Vec<&'static str> },

    #[error("Upstream unavailable: {message}")]
    UpstreamUnavailable {
        message: String,
        /// HTTP status returned by the upstream, if a response was received.
        status: Option<u16>,
        /// Raw upstream response body, if a response was received.
        body: Option<String>,
    },

    #[error("Upstream query failed: {}", format_graphql_errors(.0))]
    UpstreamQuery(Vec<serde_json::Value>),

    #[error("Unexpected upstream response: {0}")]
    UpstreamShape(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Join the `message` of each GraphQL error, falling back to the raw JSON.
pub fn format_graphql_errors(errors: &[serde_json::Value]) -> String {
    errors
        .iter()
        .map(|e| match e.get("message").and_then(|m| m.as_str()) {
            Some(message) => message.to_string(),
            None => e.to_string(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}
