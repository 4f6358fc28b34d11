//! Upstream order model.
//!
//! These types mirror what the commerce platform returns for one order,
//! flattened out of its GraphQL connection wrappers. Every field the
//! platform may omit is an `Option`; absence is a normal state and the
//! transform resolves it to a default.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// A monetary amount as reported upstream (decimal string + ISO currency).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Money {
    pub amount: Option<String>,
    pub currency_code: Option<String>,
}

/// The ordering customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl Customer {
    /// First and last name joined by one space, trimmed.
    ///
    /// Either half may be missing; a customer with neither yields `""`.
    pub fn display_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        )
        .trim()
        .to_string()
    }
}

/// A postal address. The platform may omit any field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: Option<String>,
    pub zip: Option<String>,
    pub phone: Option<String>,
}

/// One ordered product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub title: String,
    pub sku: Option<String>,
    pub quantity: i64,
    pub unit_price: Option<Money>,
}

/// One order as fetched from the upstream platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpstreamOrder {
    /// Opaque platform identifier, e.g. `gid://shopify/Order/5512`.
    pub id: String,
    /// Human-readable order name, e.g. `#1001`.
    pub name: String,
    pub created_at: Option<Timestamp>,
    pub total: Option<Money>,
    pub customer: Option<Customer>,
    pub shipping_address: Option<Address>,
    pub billing_address: Option<Address>,
    pub line_items: Vec<LineItem>,
}
