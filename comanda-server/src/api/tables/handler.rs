//! Table registry handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::common::{ApiResponse, AppResult, PageQuery, Paginated, ok_with_message};
use crate::core::AppState;
use crate::db::models::{DiningTable, TableStatus};
use crate::db::tables;

#[derive(Debug, Deserialize)]
pub struct TablesQuery {
    pub status: Option<TableStatus>,
    /// When true the response is a paged envelope instead of a flat list
    pub paginate: Option<bool>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Flat list or paged envelope, depending on the `paginate` toggle
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum TableList {
    Flat(Vec<DiningTable>),
    Paged(Paginated<DiningTable>),
}

/// GET /api/tables — public
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<TablesQuery>,
) -> AppResult<Json<ApiResponse<TableList>>> {
    let data = if query.paginate.unwrap_or(false) {
        let (per_page, offset, page) = PageQuery {
            page: query.page,
            per_page: query.per_page,
        }
        .resolve();
        let (items, total) =
            tables::list_paged(&state.db.reader, query.status, per_page, offset).await?;
        TableList::Paged(Paginated {
            items,
            page,
            per_page,
            total,
        })
    } else {
        TableList::Flat(tables::list(&state.db.reader, query.status).await?)
    };

    Ok(ok_with_message(data, "Tables fetched successfully."))
}
