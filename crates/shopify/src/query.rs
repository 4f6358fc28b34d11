//! The recent-orders GraphQL query.

/// Largest page the Admin API returns for one connection query.
pub const MAX_PAGE_SIZE: u32 = 250;

/// Line items requested per order.
pub const LINE_ITEMS_PER_ORDER: u32 = 20;

const RECENT_ORDERS_TEMPLATE: &str = r#"
{
  orders(first: $FIRST, sortKey: CREATED_AT, reverse: true) {
    edges {
      node {
        id
        name
        createdAt
        totalPriceSet {
          shopMoney {
            amount
            currencyCode
          }
        }
        customer {
          firstName
          lastName
          email
        }
        shippingAddress {
          address1
          address2
          city
          province
          country
          zip
          phone
        }
        billingAddress {
          address1
          address2
          city
          province
          country
          zip
          phone
        }
        lineItems(first: $LINE_ITEMS) {
          edges {
            node {
              title
              sku
              quantity
              originalUnitPriceSet {
                shopMoney {
                  amount
                  currencyCode
                }
              }
            }
          }
        }
      }
    }
  }
}
"#;

/// Build the query for the `page_size` most recently created orders,
/// newest first. The page size is clamped to `1..=MAX_PAGE_SIZE`.
pub fn recent_orders_query(page_size: u32) -> String {
    RECENT_ORDERS_TEMPLATE
        .replace("$FIRST", &page_size.clamp(1, MAX_PAGE_SIZE).to_string())
        .replace("$LINE_ITEMS", &LINE_ITEMS_PER_ORDER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_newest_first() {
        let query = recent_orders_query(100);
        assert!(query.contains("orders(first: 100, sortKey: CREATED_AT, reverse: true)"));
        assert!(query.contains("lineItems(first: 20)"));
        assert!(!query.contains('$'));
    }

    #[test]
    fn clamps_page_size() {
        assert!(recent_orders_query(0).contains("orders(first: 1,"));
        assert!(recent_orders_query(1000).contains("orders(first: 250,"));
    }
}
