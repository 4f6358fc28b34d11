use zaprelay_core::partner::SellerIdentity;
use zaprelay_shopify::client::DEFAULT_API_VERSION;
use zaprelay_shopify::ShopifyConfig;
use zaprelay_zapconnect::ZapConnectConfig;

/// Server configuration loaded from environment variables.
///
/// Listener settings have defaults suitable for local development. Relay
/// credentials have no defaults: when absent the server still starts and
/// `/orders` answers with a configuration error.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// Inbound HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Timeout for each outbound Shopify / ZapConnect call (default: `30`).
    pub http_client_timeout_secs: u64,
    /// Upstream, downstream and seller settings.
    pub relay: RelayConfig,
}

/// Settings for the fetch → forward pipeline.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub shopify_shop: Option<String>,
    pub shopify_access_token: Option<String>,
    pub shopify_api_version: String,
    /// Orders requested per `/orders` call (default: `100`).
    pub page_size: u32,
    pub zapconnect_api_url: Option<String>,
    pub zapconnect_api_key: Option<String>,
    pub seller: SellerIdentity,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                    |
    /// |----------------------------|----------------------------|
    /// | `HOST`                     | `0.0.0.0`                  |
    /// | `PORT`                     | `3000`                     |
    /// | `CORS_ORIGINS`             | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                       |
    /// | `HTTP_CLIENT_TIMEOUT_SECS` | `30`                       |
    /// | `SHOPIFY_SHOP`             | required for `/orders`     |
    /// | `SHOPIFY_ACCESS_TOKEN`     | required for `/orders`     |
    /// | `SHOPIFY_API_VERSION`      | `2025-01`                  |
    /// | `SHOPIFY_ORDER_PAGE_SIZE`  | `100`                      |
    /// | `ZAPCONNECT_API_URL`       | required for `/orders`     |
    /// | `ZAPCONNECT_API_KEY`       | required for `/orders`     |
    /// | `SELLER_NAME`              | `Aurora Tech`              |
    /// | `SELLER_EMAIL`             | `contact@auroratech.in`    |
    /// | `SELLER_REG_ID`            | `2`                        |
    ///
    /// Panics on malformed numeric values so misconfiguration fails fast.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host = get("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port: u16 = get("PORT")
            .unwrap_or_else(|| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = get("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = get("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let http_client_timeout_secs: u64 = get("HTTP_CLIENT_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".into())
            .parse()
            .expect("HTTP_CLIENT_TIMEOUT_SECS must be a valid u64");

        let page_size: u32 = get("SHOPIFY_ORDER_PAGE_SIZE")
            .unwrap_or_else(|| "100".into())
            .parse()
            .expect("SHOPIFY_ORDER_PAGE_SIZE must be a valid u32");

        let defaults = SellerIdentity::default();
        let seller = SellerIdentity {
            name: get("SELLER_NAME").unwrap_or(defaults.name),
            email: get("SELLER_EMAIL").unwrap_or(defaults.email),
            reg_id: get("SELLER_REG_ID")
                .map(|v| v.parse().expect("SELLER_REG_ID must be a valid i64"))
                .unwrap_or(defaults.reg_id),
        };

        let relay = RelayConfig {
            shopify_shop: get("SHOPIFY_SHOP"),
            shopify_access_token: get("SHOPIFY_ACCESS_TOKEN"),
            shopify_api_version: get("SHOPIFY_API_VERSION")
                .unwrap_or_else(|| DEFAULT_API_VERSION.into()),
            page_size,
            zapconnect_api_url: get("ZAPCONNECT_API_URL"),
            zapconnect_api_key: get("ZAPCONNECT_API_KEY"),
            seller,
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            http_client_timeout_secs,
            relay,
        }
    }
}

impl RelayConfig {
    /// Shopify connection settings, or the names of the missing variables.
    pub fn shopify(&self) -> Result<ShopifyConfig, Vec<&'static str>> {
        match (&self.shopify_shop, &self.shopify_access_token) {
            (Some(shop), Some(token)) => Ok(ShopifyConfig {
                shop: shop.clone(),
                access_token: token.clone(),
                api_version: self.shopify_api_version.clone(),
            }),
            (shop, token) => Err(missing([
                ("SHOPIFY_SHOP", shop),
                ("SHOPIFY_ACCESS_TOKEN", token),
            ])),
        }
    }

    /// ZapConnect connection settings, or the names of the missing variables.
    pub fn zapconnect(&self) -> Result<ZapConnectConfig, Vec<&'static str>> {
        match (&self.zapconnect_api_url, &self.zapconnect_api_key) {
            (Some(url), Some(key)) => Ok(ZapConnectConfig {
                api_url: url.clone(),
                api_key: key.clone(),
            }),
            (url, key) => Err(missing([
                ("ZAPCONNECT_API_URL", url),
                ("ZAPCONNECT_API_KEY", key),
            ])),
        }
    }
}

fn missing<const N: usize>(pairs: [(&'static str, &Option<String>); N]) -> Vec<&'static str> {
    pairs
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(key, _)| key)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]);

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.cors_origins, ["http://localhost:5173"]);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.relay.page_size, 100);
        assert_eq!(config.relay.shopify_api_version, "2025-01");
        assert_eq!(config.relay.seller, SellerIdentity::default());
    }

    #[test]
    fn reads_relay_settings() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("CORS_ORIGINS", "https://a.example, https://b.example,"),
            ("SHOPIFY_SHOP", "aurora.myshopify.com"),
            ("SHOPIFY_ACCESS_TOKEN", "shpat_x"),
            ("SHOPIFY_ORDER_PAGE_SIZE", "10"),
            ("ZAPCONNECT_API_URL", "https://api.zapconnect.example/orders"),
            ("ZAPCONNECT_API_KEY", "zc_x"),
            ("SELLER_REG_ID", "9"),
        ]);

        assert_eq!(config.port, 8080);
        assert_eq!(config.cors_origins, ["https://a.example", "https://b.example"]);
        assert_eq!(config.relay.page_size, 10);
        assert_eq!(config.relay.seller.reg_id, 9);

        let shopify = config.relay.shopify().unwrap();
        assert_eq!(shopify.shop, "aurora.myshopify.com");
        assert_eq!(shopify.access_token, "shpat_x");

        let zap = config.relay.zapconnect().unwrap();
        assert_eq!(zap.api_url, "https://api.zapconnect.example/orders");
    }

    #[test]
    fn blank_credentials_count_as_missing() {
        let config = config_from(&[("SHOPIFY_SHOP", "aurora.myshopify.com"), ("SHOPIFY_ACCESS_TOKEN", "  ")]);

        assert_matches!(
            config.relay.shopify(),
            Err(keys) if keys == ["SHOPIFY_ACCESS_TOKEN"]
        );
        assert_matches!(
            config.relay.zapconnect(),
            Err(keys) if keys == ["ZAPCONNECT_API_URL", "ZAPCONNECT_API_KEY"]
        );
    }

    #[test]
    #[should_panic(expected = "PORT must be a valid u16")]
    fn malformed_port_fails_fast() {
        config_from(&[("PORT", "eighty")]);
    }
}
