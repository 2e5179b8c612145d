//! Food catalog API module

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::{Role, require_role};
use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/foods", get(handler::list).post(handler::create))
        .route(
            "/api/foods/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .patch(handler::update)
                .delete(handler::delete),
        )
        .layer(middleware::from_fn(require_role(&[Role::Waiter])))
}
