//! ZapConnect order sink.
//!
//! Posts one partner-schema order per request to the ZapConnect REST API
//! and reports the outcome without retrying.

pub mod client;

pub use client::{ZapConnectClient, ZapConnectConfig, ZapConnectError};
