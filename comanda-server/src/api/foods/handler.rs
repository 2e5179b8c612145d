//! Food catalog handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use validator::Validate;

use crate::common::{ApiResponse, AppError, AppResult, PageQuery, Paginated, ok_with_message};
use crate::core::AppState;
use crate::db::foods;
use crate::db::models::Food;

#[derive(Debug, Deserialize, Validate)]
pub struct FoodCreateRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(range(min = 0, message = "price must be non-negative"))]
    pub price: i64,
    #[validate(length(max = 100, message = "category must be at most 100 characters"))]
    pub category: Option<String>,
}

/// Partial update; omitted fields keep their current value
#[derive(Debug, Deserialize, Validate)]
pub struct FoodUpdateRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(range(min = 0, message = "price must be non-negative"))]
    pub price: Option<i64>,
    #[validate(length(max = 100, message = "category must be at most 100 characters"))]
    pub category: Option<String>,
}

fn validated<T: Validate>(payload: &T) -> AppResult<()> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))
}

/// The name-uniqueness pre-check can race with a concurrent insert; when the
/// UNIQUE constraint fires anyway, report it like the pre-check would have.
fn name_taken(name: &str, e: sqlx::Error) -> AppError {
    if e.as_database_error()
        .is_some_and(|d| d.is_unique_violation())
    {
        AppError::validation(format!("Food '{name}' already exists"))
    } else {
        e.into()
    }
}

/// GET /api/foods — newest first, paginated
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<ApiResponse<Paginated<Food>>>> {
    let (per_page, offset, page) = query.resolve();
    let (items, total) = foods::list_paged(&state.db.reader, per_page, offset).await?;
    Ok(ok_with_message(
        Paginated {
            items,
            page,
            per_page,
            total,
        },
        "Foods fetched successfully.",
    ))
}

/// GET /api/foods/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Food>>> {
    let food = foods::find_by_id(&state.db.reader, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Food {id} not found")))?;
    Ok(ok_with_message(food, "Food fetched successfully."))
}

/// POST /api/foods
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<FoodCreateRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Food>>)> {
    validated(&payload)?;

    if foods::find_by_name(&state.db.reader, &payload.name, None)
        .await?
        .is_some()
    {
        return Err(AppError::validation(format!(
            "Food '{}' already exists",
            payload.name
        )));
    }

    let food = foods::create(
        &state.db.writer,
        &payload.name,
        payload.price,
        payload.category.as_deref(),
    )
    .await
    .map_err(|e| name_taken(&payload.name, e))?;

    Ok((
        StatusCode::CREATED,
        ok_with_message(food, "Food created successfully."),
    ))
}

/// PUT /api/foods/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<FoodUpdateRequest>,
) -> AppResult<Json<ApiResponse<Food>>> {
    validated(&payload)?;

    let existing = foods::find_by_id(&state.db.reader, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Food {id} not found")))?;

    let name = payload.name.unwrap_or(existing.name);
    let price = payload.price.unwrap_or(existing.price);
    let category = payload.category.or(existing.category);

    // Uniqueness check excludes the row being updated
    if foods::find_by_name(&state.db.reader, &name, Some(id))
        .await?
        .is_some()
    {
        return Err(AppError::validation(format!("Food '{name}' already exists")));
    }

    let food = foods::update(&state.db.writer, id, &name, price, category.as_deref())
        .await
        .map_err(|e| name_taken(&name, e))?
        .ok_or_else(|| AppError::not_found(format!("Food {id} not found")))?;

    Ok(ok_with_message(food, "Food updated successfully."))
}

/// DELETE /api/foods/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<StatusCode> {
    let removed = foods::delete(&state.db.writer, id).await?;
    if !removed {
        return Err(AppError::not_found(format!("Food {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    /// A duplicate insert that slips past the pre-check must still surface
    /// as a 422, not a database error.
    #[tokio::test]
    async fn test_unique_violation_maps_to_validation() {
        let dir = tempfile::tempdir().unwrap();
        let db = DbService::new(dir.path().join("test.db").to_str().unwrap())
            .await
            .unwrap();

        foods::create(&db.writer, "Tea", 8000, None).await.unwrap();
        let err = foods::create(&db.writer, "Tea", 9000, None)
            .await
            .unwrap_err();

        let mapped = name_taken("Tea", err);
        assert!(matches!(mapped, AppError::Validation(_)));
        assert_eq!(mapped.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_other_db_errors_pass_through() {
        let mapped = name_taken("Tea", sqlx::Error::RowNotFound);
        assert!(matches!(mapped, AppError::Database(_)));
    }
}
