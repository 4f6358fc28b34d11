//! Domain core of the order relay.
//!
//! - [`order`]: the upstream order model as fetched from the commerce
//!   platform.
//! - [`partner`]: the partner logistics schema and the pure transform into it.
//! - [`ledger`]: the in-process dedup ledger of forwarded order ids.
//! - [`pipeline`]: the source/sink seams and the fetch → transform →
//!   filter → forward pass that ties them together.

pub mod error;
pub mod ledger;
pub mod order;
pub mod partner;
pub mod pipeline;
pub mod types;
