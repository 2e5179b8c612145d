//! Order API handlers
//!
//! Thin dispatch over the order ledger: deserialize, validate, call the
//! transition, wrap the result.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use validator::Validate;

use crate::common::{ApiResponse, AppError, AppResult, PageQuery, Paginated, ok_with_message};
use crate::core::AppState;
use crate::db::models::OrderDetail;
use crate::orders::render_receipt;

#[derive(Debug, Deserialize)]
pub struct OpenOrderRequest {
    pub table_id: i64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddItemRequest {
    pub food_id: i64,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i64,
}

/// GET /api/orders — newest first, paginated, table + lines eager-loaded
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<ApiResponse<Paginated<OrderDetail>>>> {
    let (per_page, offset, page) = query.resolve();
    let (items, total) = state.ledger.list_orders(per_page, offset).await?;
    Ok(ok_with_message(
        Paginated {
            items,
            page,
            per_page,
            total,
        },
        "Orders fetched successfully.",
    ))
}

/// POST /api/orders/open
pub async fn open(
    State(state): State<AppState>,
    Json(payload): Json<OpenOrderRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<OrderDetail>>)> {
    let order = state.ledger.open_order(payload.table_id).await?;
    Ok((
        StatusCode::CREATED,
        ok_with_message(order, "Order opened successfully."),
    ))
}

/// GET /api/orders/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    let order = state.ledger.get_order(id).await?;
    Ok(ok_with_message(order, "Order fetched successfully."))
}

/// POST /api/orders/{id}/items
pub async fn add_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<AddItemRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<OrderDetail>>)> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let order = state
        .ledger
        .add_item(id, payload.food_id, payload.quantity)
        .await?;
    Ok((
        StatusCode::CREATED,
        ok_with_message(order, "Item added to order successfully."),
    ))
}

/// POST /api/orders/{id}/close
pub async fn close(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    let order = state.ledger.close_order(id).await?;
    Ok(ok_with_message(order, "Order closed successfully."))
}

/// GET /api/orders/{id}/receipt — text file download, closed orders only
pub async fn receipt(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Response> {
    let order = state.ledger.get_order(id).await?;
    let text = render_receipt(&order)?;

    let headers = [
        (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"receipt-order-{id}.txt\""),
        ),
    ];
    Ok((headers, text).into_response())
}
