//! Shopify Admin API order source.
//!
//! Issues one GraphQL query for the most recent orders and flattens the
//! connection/edge/node response into [`zaprelay_core::order::UpstreamOrder`]s.

pub mod client;
pub mod error;
pub mod query;
pub mod wire;

pub use client::{ShopifyClient, ShopifyConfig};
pub use error::ShopifyError;
