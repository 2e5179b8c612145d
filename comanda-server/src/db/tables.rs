//! Table registry reads
//!
//! No write functions live here: table status changes flow exclusively
//! through the order ledger's open/close transitions.

use sqlx::SqlitePool;

use super::models::{DiningTable, TableStatus};

/// All tables ordered by number, optionally filtered by status
pub async fn list(
    pool: &SqlitePool,
    status: Option<TableStatus>,
) -> Result<Vec<DiningTable>, sqlx::Error> {
    match status {
        Some(status) => {
            sqlx::query_as::<_, DiningTable>(
                "SELECT id, number, status FROM tables WHERE status = ? ORDER BY number",
            )
            .bind(status)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, DiningTable>(
                "SELECT id, number, status FROM tables ORDER BY number",
            )
            .fetch_all(pool)
            .await
        }
    }
}

/// One page of tables ordered by number, plus the filtered total
pub async fn list_paged(
    pool: &SqlitePool,
    status: Option<TableStatus>,
    per_page: i64,
    offset: i64,
) -> Result<(Vec<DiningTable>, i64), sqlx::Error> {
    let (tables, total) = match status {
        Some(status) => {
            let tables = sqlx::query_as::<_, DiningTable>(
                "SELECT id, number, status FROM tables WHERE status = ? \
                 ORDER BY number LIMIT ? OFFSET ?",
            )
            .bind(status)
            .bind(per_page)
            .bind(offset)
            .fetch_all(pool)
            .await?;
            let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tables WHERE status = ?")
                .bind(status)
                .fetch_one(pool)
                .await?;
            (tables, total)
        }
        None => {
            let tables = sqlx::query_as::<_, DiningTable>(
                "SELECT id, number, status FROM tables ORDER BY number LIMIT ? OFFSET ?",
            )
            .bind(per_page)
            .bind(offset)
            .fetch_all(pool)
            .await?;
            let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tables")
                .fetch_one(pool)
                .await?;
            (tables, total)
        }
    };
    Ok((tables, total))
}
