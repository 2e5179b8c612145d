//! Persisted entities and read projections

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::auth::Role;

/// Seating status of a dining table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum TableStatus {
    Available,
    Occupied,
}

/// A physical seating resource with binary occupancy status
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DiningTable {
    pub id: i64,
    pub number: i64,
    pub status: TableStatus,
}

/// A sellable menu entry; `price` is the current price in minor units
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Food {
    pub id: i64,
    pub name: String,
    pub price: i64,
    pub category: Option<String>,
    pub created_at: i64,
}

/// Order lifecycle state; `closed` is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum OrderStatus {
    Open,
    Closed,
}

/// A tab opened against one table
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Order {
    pub id: i64,
    pub table_id: i64,
    pub status: OrderStatus,
    /// Denormalized cache of `sum(quantity * unit_price)` over the order's
    /// lines, recomputed inside every mutating transition.
    pub total: i64,
    pub created_at: i64,
}

/// One line item; `unit_price` is snapshotted at creation and never changes
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OrderLine {
    pub id: i64,
    pub order_id: i64,
    pub food_id: i64,
    pub quantity: i64,
    pub unit_price: i64,
}

/// Order line with its food name resolved (LEFT JOIN — the food may have
/// been deleted since the line was created)
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OrderLineDetail {
    pub id: i64,
    pub order_id: i64,
    pub food_id: i64,
    pub quantity: i64,
    pub unit_price: i64,
    pub food_name: Option<String>,
}

/// An order with its table and lines eager-loaded
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetail {
    pub id: i64,
    pub status: OrderStatus,
    pub total: i64,
    pub created_at: i64,
    pub table: DiningTable,
    pub lines: Vec<OrderLineDetail>,
}

/// Staff account for the access gate
#[derive(Debug, Clone, FromRow)]
pub struct Staff {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}

impl Staff {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.password_hash)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_round_trip() {
        let hash = Staff::hash_password("secret123").unwrap();
        let staff = Staff {
            id: 1,
            username: "waiter".to_string(),
            password_hash: hash,
            role: Role::Waiter,
        };
        assert!(staff.verify_password("secret123").unwrap());
        assert!(!staff.verify_password("wrong").unwrap());
    }
}
