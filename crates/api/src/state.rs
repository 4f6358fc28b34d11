use std::sync::Arc;
use std::time::Duration;

use zaprelay_core::error::CoreError;
use zaprelay_core::ledger::DedupLedger;
use zaprelay_core::pipeline::{OrderSink, OrderSource};
use zaprelay_shopify::{ShopifyClient, ShopifyError};
use zaprelay_zapconnect::{ZapConnectClient, ZapConnectError};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Ids of orders already forwarded by this process.
    pub ledger: Arc<DedupLedger>,
    /// Where orders are fetched from.
    pub source: Connector<dyn OrderSource>,
    /// Where new orders are forwarded to.
    pub sink: Connector<dyn OrderSink>,
}

/// A collaborator that is either configured or missing required settings.
///
/// Missing settings are reported per request instead of preventing startup.
pub enum Connector<T: ?Sized> {
    Ready(Arc<T>),
    Missing(Vec<&'static str>),
}

impl<T: ?Sized> Clone for Connector<T> {
    fn clone(&self) -> Self {
        match self {
            Connector::Ready(inner) => Connector::Ready(Arc::clone(inner)),
            Connector::Missing(keys) => Connector::Missing(keys.clone()),
        }
    }
}

impl<T: ?Sized> Connector<T> {
    /// Names of the missing settings; empty when ready.
    pub fn missing_keys(&self) -> &[&'static str] {
        match self {
            Connector::Ready(_) => &[],
            Connector::Missing(keys) => keys,
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Connector::Ready(inner) => Some(inner.as_ref()),
            Connector::Missing(_) => None,
        }
    }
}

impl AppState {
    /// Both pipeline collaborators, or one error naming every missing setting.
    pub fn connectors(&self) -> Result<(&dyn OrderSource, &dyn OrderSink), CoreError> {
        match (self.source.ready(), self.sink.ready()) {
            (Some(source), Some(sink)) => Ok((source, sink)),
            _ => Err(CoreError::ConfigMissing {
                keys: self
                    .source
                    .missing_keys()
                    .iter()
                    .chain(self.sink.missing_keys())
                    .copied()
                    .collect(),
            }),
        }
    }
}

/// Build the Shopify order source from configuration.
///
/// Missing credentials yield [`Connector::Missing`]; a malformed shop value
/// is an error.
pub fn shopify_source(config: &ServerConfig) -> Result<Connector<dyn OrderSource>, ShopifyError> {
    match config.relay.shopify() {
        Ok(shopify) => {
            let timeout = Duration::from_secs(config.http_client_timeout_secs);
            let client = ShopifyClient::new(&shopify, timeout)?;
            tracing::info!(endpoint = %client.endpoint(), "Shopify source configured");
            let source: Arc<dyn OrderSource> = Arc::new(client);
            Ok(Connector::Ready(source))
        }
        Err(keys) => {
            tracing::warn!(?keys, "Shopify source not configured");
            Ok(Connector::Missing(keys))
        }
    }
}

/// Build the ZapConnect order sink from configuration.
///
/// Missing credentials yield [`Connector::Missing`]; a malformed URL is an
/// error.
pub fn zapconnect_sink(
    config: &ServerConfig,
) -> Result<Connector<dyn OrderSink>, ZapConnectError> {
    match config.relay.zapconnect() {
        Ok(zapconnect) => {
            let timeout = Duration::from_secs(config.http_client_timeout_secs);
            let client = ZapConnectClient::new(&zapconnect, timeout)?;
            tracing::info!(url = %zapconnect.api_url, "ZapConnect sink configured");
            let sink: Arc<dyn OrderSink> = Arc::new(client);
            Ok(Connector::Ready(sink))
        }
        Err(keys) => {
            tracing::warn!(?keys, "ZapConnect sink not configured");
            Ok(Connector::Missing(keys))
        }
    }
}
