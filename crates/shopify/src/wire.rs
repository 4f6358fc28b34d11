//! Admin API response shapes and their conversion into the core order model.

use serde::Deserialize;
use zaprelay_core::order::{Address, Customer, LineItem, Money, UpstreamOrder};
use zaprelay_core::types::Timestamp;

use crate::error::ShopifyError;

/// Top-level GraphQL envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQLResponse {
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    /// Normally a list; some failures put a bare string or object here.
    #[serde(default)]
    pub errors: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
}

#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

impl<T> Connection<T> {
    pub fn into_nodes(self) -> impl Iterator<Item = T> {
        self.edges.into_iter().map(|e| e.node)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyV2 {
    pub amount: Option<String>,
    pub currency_code: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyBag {
    pub shop_money: Option<MoneyV2>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerNode {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MailingAddress {
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: Option<String>,
    pub zip: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemNode {
    pub title: Option<String>,
    pub sku: Option<String>,
    pub quantity: Option<i64>,
    pub original_unit_price_set: Option<MoneyBag>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderNode {
    pub id: String,
    pub name: String,
    pub created_at: Option<Timestamp>,
    pub total_price_set: Option<MoneyBag>,
    pub customer: Option<CustomerNode>,
    pub shipping_address: Option<MailingAddress>,
    pub billing_address: Option<MailingAddress>,
    pub line_items: Option<Connection<LineItemNode>>,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

fn convert_money(bag: Option<MoneyBag>) -> Option<Money> {
    bag.and_then(|b| b.shop_money).map(|m| Money {
        amount: m.amount,
        currency_code: m.currency_code,
    })
}

impl From<MailingAddress> for Address {
    fn from(a: MailingAddress) -> Self {
        Address {
            address1: a.address1,
            address2: a.address2,
            city: a.city,
            province: a.province,
            country: a.country,
            zip: a.zip,
            phone: a.phone,
        }
    }
}

impl From<LineItemNode> for LineItem {
    fn from(li: LineItemNode) -> Self {
        LineItem {
            title: li.title.unwrap_or_default(),
            sku: li.sku,
            quantity: li.quantity.unwrap_or_default(),
            unit_price: convert_money(li.original_unit_price_set),
        }
    }
}

impl From<OrderNode> for UpstreamOrder {
    fn from(node: OrderNode) -> Self {
        UpstreamOrder {
            id: node.id,
            name: node.name,
            created_at: node.created_at,
            total: convert_money(node.total_price_set),
            customer: node.customer.map(|c| Customer {
                first_name: c.first_name,
                last_name: c.last_name,
                email: c.email,
            }),
            shipping_address: node.shipping_address.map(Address::from),
            billing_address: node.billing_address.map(Address::from),
            line_items: node
                .line_items
                .map(|c| c.into_nodes().map(LineItem::from).collect())
                .unwrap_or_default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Extract the order list from a recent-orders response body.
///
/// GraphQL-level errors reject the whole response even when partial `data`
/// is present.
pub fn parse_orders_response(body: serde_json::Value) -> Result<Vec<UpstreamOrder>, ShopifyError> {
    let response: GraphQLResponse = serde_json::from_value(body)?;

    let errors = match response.errors {
        None | Some(serde_json::Value::Null) => Vec::new(),
        Some(serde_json::Value::Array(list)) => list,
        Some(other) => vec![other],
    };
    if !errors.is_empty() {
        return Err(ShopifyError::GraphQL(errors));
    }

    let orders = response
        .data
        .and_then(|mut data| data.get_mut("orders").map(serde_json::Value::take))
        .filter(|orders| !orders.is_null())
        .ok_or(ShopifyError::MissingOrders)?;

    let connection: Connection<OrderNode> = serde_json::from_value(orders)?;
    Ok(connection.into_nodes().map(UpstreamOrder::from).collect())
}
