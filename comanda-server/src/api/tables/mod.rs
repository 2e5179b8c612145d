//! Table registry API module
//!
//! Read-only and public: guests check seat availability before being seated.
//! Status changes flow through the order ledger, never through this API.

mod handler;

use axum::{Router, routing::get};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/tables", get(handler::list))
}
