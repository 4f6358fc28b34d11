//! Route definitions for the order relay endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::orders;
use crate::state::AppState;

/// ```text
/// GET  /orders         -> relay_orders
/// POST /clear-cache    -> clear_cache
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(orders::relay_orders))
        .route("/clear-cache", post(orders::clear_cache))
}
