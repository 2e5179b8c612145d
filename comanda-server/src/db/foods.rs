//! Food catalog CRUD
//!
//! Simple create/read/update/delete with a uniqueness constraint on name.
//! Deletion is a hard delete with no guard against order lines referencing
//! the food — lines keep their price snapshot and a dangling `food_id`.

use sqlx::SqlitePool;

use super::models::Food;
use crate::common::now_millis;

/// One page of foods, newest first, plus the total count
pub async fn list_paged(
    pool: &SqlitePool,
    per_page: i64,
    offset: i64,
) -> Result<(Vec<Food>, i64), sqlx::Error> {
    let foods = sqlx::query_as::<_, Food>(
        "SELECT id, name, price, category, created_at FROM foods \
         ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
    )
    .bind(per_page)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM foods")
        .fetch_one(pool)
        .await?;
    Ok((foods, total))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Food>, sqlx::Error> {
    sqlx::query_as::<_, Food>("SELECT id, name, price, category, created_at FROM foods WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Find a food by name, excluding `exclude_id` when updating in place
pub async fn find_by_name(
    pool: &SqlitePool,
    name: &str,
    exclude_id: Option<i64>,
) -> Result<Option<Food>, sqlx::Error> {
    sqlx::query_as::<_, Food>(
        "SELECT id, name, price, category, created_at FROM foods \
         WHERE name = ? AND (? IS NULL OR id != ?) LIMIT 1",
    )
    .bind(name)
    .bind(exclude_id)
    .bind(exclude_id)
    .fetch_optional(pool)
    .await
}

pub async fn create(
    pool: &SqlitePool,
    name: &str,
    price: i64,
    category: Option<&str>,
) -> Result<Food, sqlx::Error> {
    sqlx::query_as::<_, Food>(
        "INSERT INTO foods (name, price, category, created_at) VALUES (?, ?, ?, ?) \
         RETURNING id, name, price, category, created_at",
    )
    .bind(name)
    .bind(price)
    .bind(category)
    .bind(now_millis())
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    name: &str,
    price: i64,
    category: Option<&str>,
) -> Result<Option<Food>, sqlx::Error> {
    sqlx::query_as::<_, Food>(
        "UPDATE foods SET name = ?, price = ?, category = ? WHERE id = ? \
         RETURNING id, name, price, category, created_at",
    )
    .bind(name)
    .bind(price)
    .bind(category)
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Hard delete; returns whether a row was removed
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM foods WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
