//! Development seeding
//!
//! Populates an empty database with ten tables, a small sample menu and
//! default staff accounts so a fresh checkout serves requests immediately.

use sqlx::SqlitePool;

use super::models::Staff;
use super::{foods, staff};
use crate::auth::Role;
use crate::common::AppError;

const TABLE_COUNT: i64 = 10;

const SAMPLE_MENU: &[(&str, i64, &str)] = &[
    ("Fried Rice", 20_000, "food"),
    ("Chicken Noodle", 18_000, "food"),
    ("Iced Tea", 8_000, "drink"),
];

/// Seed tables, menu and staff accounts when their relations are empty
pub async fn seed_if_empty(pool: &SqlitePool) -> Result<(), AppError> {
    let table_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tables")
        .fetch_one(pool)
        .await?;
    if table_count == 0 {
        for number in 1..=TABLE_COUNT {
            sqlx::query("INSERT INTO tables (number, status) VALUES (?, 'available')")
                .bind(number)
                .execute(pool)
                .await?;
        }
        tracing::info!(count = TABLE_COUNT, "Seeded dining tables");
    }

    let food_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM foods")
        .fetch_one(pool)
        .await?;
    if food_count == 0 {
        for &(name, price, category) in SAMPLE_MENU {
            foods::create(pool, name, price, Some(category)).await?;
        }
        tracing::info!(count = SAMPLE_MENU.len(), "Seeded sample menu");
    }

    let staff_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM staff")
        .fetch_one(pool)
        .await?;
    if staff_count == 0 {
        for (username, password, role) in [
            ("waiter", "waiter123", Role::Waiter),
            ("cashier", "cashier123", Role::Cashier),
        ] {
            let hash = Staff::hash_password(password)
                .map_err(|e| AppError::internal(format!("Failed to hash seed password: {e}")))?;
            staff::create(pool, username, &hash, role).await?;
        }
        tracing::warn!("Seeded default staff accounts (waiter/cashier) — change these passwords");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    async fn count(pool: &SqlitePool, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_seed_populates_empty_db_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let db = DbService::new(dir.path().join("test.db").to_str().unwrap())
            .await
            .unwrap();

        seed_if_empty(&db.writer).await.unwrap();
        assert_eq!(count(&db.writer, "tables").await, TABLE_COUNT);
        assert_eq!(count(&db.writer, "foods").await, SAMPLE_MENU.len() as i64);
        assert_eq!(count(&db.writer, "staff").await, 2);

        // A second run must not duplicate anything
        seed_if_empty(&db.writer).await.unwrap();
        assert_eq!(count(&db.writer, "tables").await, TABLE_COUNT);
        assert_eq!(count(&db.writer, "foods").await, SAMPLE_MENU.len() as i64);
        assert_eq!(count(&db.writer, "staff").await, 2);
    }
}
