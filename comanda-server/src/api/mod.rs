//! API route modules
//!
//! # Structure
//!
//! - [`health`] — liveness check
//! - [`auth`] — login/logout
//! - [`tables`] — table registry (public reads)
//! - [`foods`] — food catalog CRUD
//! - [`orders`] — order lifecycle and receipts

pub mod auth;
pub mod foods;
pub mod health;
pub mod orders;
pub mod tables;

use axum::{Router, middleware, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::core::AppState;

/// Build the full application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(auth::router())
        .merge(tables::router())
        .merge(foods::router())
        .merge(orders::router())
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
