pub mod health;
pub mod orders;

use axum::Router;

use crate::state::AppState;

/// Build the relay route tree.
///
/// ```text
/// GET  /orders         fetch, transform, forward new orders
/// POST /clear-cache    reset the dedup ledger
/// ```
pub fn relay_routes() -> Router<AppState> {
    Router::new().merge(orders::router())
}
