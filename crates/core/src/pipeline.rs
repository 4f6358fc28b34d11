//! Fetch → transform → filter → forward.
//!
//! [`OrderSource`] and [`OrderSink`] are the two network seams; everything
//! between them is synchronous. One [`RelayPipeline::run`] is a single linear
//! pass: it never loops back to an earlier stage, and an upstream failure
//! aborts the pass before anything is forwarded. Sink failures are per-order
//! and never abort the pass.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::CoreError;
use crate::ledger::DedupLedger;
use crate::order::UpstreamOrder;
use crate::partner::{transform_all, SellerIdentity, TransformedOrder};

// ---------------------------------------------------------------------------
// Seams
// ---------------------------------------------------------------------------

/// Supplies the most recent upstream orders.
#[async_trait]
pub trait OrderSource: Send + Sync {
    /// Fetch up to `limit` orders, newest first. One attempt, no retry.
    async fn fetch_recent_orders(&self, limit: u32) -> Result<Vec<UpstreamOrder>, CoreError>;
}

/// Accepts one transformed order.
#[async_trait]
pub trait OrderSink: Send + Sync {
    /// Forward one order. Ordinary HTTP failures are reported in the
    /// outcome, never as a panic or error. One attempt, no retry.
    async fn forward(&self, order: &TransformedOrder) -> ForwardOutcome;
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Result of forwarding one order to the sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ForwardOutcome {
    /// The sink accepted the order (2xx).
    Success { response: serde_json::Value },
    /// The sink answered with a non-2xx status.
    Rejected { status_code: u16, body: String },
    /// No response was received.
    Unreachable { message: String },
}

impl ForwardOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ForwardOutcome::Success { .. })
    }
}

/// A [`ForwardOutcome`] tagged with the order it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForwardResult {
    pub order_id: String,
    pub order_name: String,
    #[serde(flatten)]
    pub outcome: ForwardOutcome,
}

/// Counts and per-order sink results of one pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProcessingSummary {
    pub total_orders: usize,
    /// Orders not yet forwarded when examined; forwarding was attempted.
    pub new_orders: usize,
    pub already_processed: usize,
    pub zapconnect_results: Vec<ForwardResult>,
}

/// Everything one pass produced.
#[derive(Debug, Clone)]
pub struct RelayReport {
    pub orders: Vec<TransformedOrder>,
    pub summary: ProcessingSummary,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// One configured relay pass over borrowed collaborators.
pub struct RelayPipeline<'a> {
    pub source: &'a dyn OrderSource,
    pub sink: &'a dyn OrderSink,
    pub ledger: &'a DedupLedger,
    pub seller: &'a SellerIdentity,
    pub page_size: u32,
}

impl RelayPipeline<'_> {
    /// Run fetch → transform → filter → forward once.
    ///
    /// Orders forwarded before a later fault stay marked. If the returned
    /// future is dropped mid-forward, the order in flight is released.
    pub async fn run(&self) -> Result<RelayReport, CoreError> {
        let upstream = self.source.fetch_recent_orders(self.page_size).await?;
        tracing::info!(count = upstream.len(), "Fetched upstream orders");

        let orders = transform_all(&upstream, self.seller);
        let summary = self.forward_new(&orders).await;

        tracing::info!(
            total = summary.total_orders,
            new = summary.new_orders,
            already_processed = summary.already_processed,
            "Relay pass complete"
        );

        Ok(RelayReport { orders, summary })
    }

    /// Forward every order the ledger has not seen, sequentially and in
    /// fetch order.
    async fn forward_new(&self, orders: &[TransformedOrder]) -> ProcessingSummary {
        let mut summary = ProcessingSummary {
            total_orders: orders.len(),
            ..Default::default()
        };

        for order in orders {
            let order_id = order.seller_orderid.as_str();

            let Some(claim) = self.ledger.claim(order_id) else {
                if self.ledger.has(order_id) {
                    tracing::debug!(order_id, "Order already forwarded, skipping");
                } else {
                    tracing::debug!(order_id, "Order being forwarded by another pass, skipping");
                }
                summary.already_processed += 1;
                continue;
            };
            summary.new_orders += 1;

            // Dropping `claim` unmarked, including on cancellation, releases it.
            let outcome = self.sink.forward(order).await;
            if outcome.is_success() {
                claim.mark();
                tracing::info!(order_id, "Order forwarded");
            } else {
                drop(claim);
                tracing::warn!(order_id, ?outcome, "Order forward failed, will retry next poll");
            }

            summary.zapconnect_results.push(ForwardResult {
                order_id: order_id.to_string(),
                order_name: order.seller_ordernumber.clone(),
                outcome,
            });
        }

        summary
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
