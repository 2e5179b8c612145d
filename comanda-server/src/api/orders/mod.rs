//! Order API module
//!
//! Role gating per operation: waiters open orders and add items, both roles
//! list/inspect/close, cashiers print receipts. The ledger itself never sees
//! a role.

mod handler;

use axum::{Router, middleware, routing::get, routing::post};

use crate::auth::{Role, require_role};
use crate::core::AppState;

pub fn router() -> Router<AppState> {
    let read_routes = Router::new()
        .route("/api/orders", get(handler::list))
        .route("/api/orders/{id}", get(handler::get_by_id))
        .route("/api/orders/{id}/close", post(handler::close))
        .layer(middleware::from_fn(require_role(&[
            Role::Waiter,
            Role::Cashier,
        ])));

    let waiter_routes = Router::new()
        .route("/api/orders/open", post(handler::open))
        .route("/api/orders/{id}/items", post(handler::add_item))
        .layer(middleware::from_fn(require_role(&[Role::Waiter])));

    let cashier_routes = Router::new()
        .route("/api/orders/{id}/receipt", get(handler::receipt))
        .layer(middleware::from_fn(require_role(&[Role::Cashier])));

    read_routes.merge(waiter_routes).merge(cashier_routes)
}
