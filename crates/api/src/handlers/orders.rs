//! Handlers for the order relay endpoints.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use zaprelay_core::partner::TransformedOrder;
use zaprelay_core::pipeline::{ProcessingSummary, RelayPipeline};
use zaprelay_core::types::Timestamp;

use crate::error::AppResult;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Response body for `GET /orders`.
#[derive(Debug, Serialize)]
pub struct OrdersResponse {
    /// Every fetched order in partner form, forwarded or not.
    pub orders: Vec<TransformedOrder>,
    pub processing_summary: ProcessingSummary,
    pub timestamp: Timestamp,
}

/// Response body for `POST /clear-cache`.
#[derive(Debug, Serialize)]
pub struct ClearCacheResponse {
    pub message: &'static str,
    /// Number of order ids removed from the ledger.
    pub cleared: usize,
    pub timestamp: Timestamp,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /orders
///
/// Fetch the most recent orders, forward the ones not yet relayed, and
/// return all of them with a per-order summary of the forwards.
pub async fn relay_orders(State(state): State<AppState>) -> AppResult<Json<OrdersResponse>> {
    let (source, sink) = state.connectors()?;

    let pipeline = RelayPipeline {
        source,
        sink,
        ledger: &state.ledger,
        seller: &state.config.relay.seller,
        page_size: state.config.relay.page_size,
    };
    let report = pipeline.run().await?;

    Ok(Json(OrdersResponse {
        orders: report.orders,
        processing_summary: report.summary,
        timestamp: chrono::Utc::now(),
    }))
}

/// POST /clear-cache
///
/// Forget every forwarded order id so the next `/orders` call forwards them
/// again.
pub async fn clear_cache(State(state): State<AppState>) -> Json<ClearCacheResponse> {
    let cleared = state.ledger.reset();
    tracing::info!(cleared, "Dedup ledger cleared");

    Json(ClearCacheResponse {
        message: "Processed order cache cleared",
        cleared,
        timestamp: chrono::Utc::now(),
    })
}
