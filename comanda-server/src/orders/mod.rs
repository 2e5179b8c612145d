//! Order Ledger
//!
//! The order lifecycle state machine. Owns the `open → closed` transitions,
//! price-snapshot line items, transactional total recomputation, and the
//! table-status flips that accompany opening and closing.
//!
//! # Transition flow
//!
//! ```text
//! OpenOrder(table)  ── lock table row ─▶ Order{open, total=0}, table occupied
//! AddItem(order)    ── lock order row ─▶ new line (price snapshot) + full total recompute
//! CloseOrder(order) ── lock order row ─▶ final recompute, closed, table released
//! ```
//!
//! All three transitions run in one transaction on the single-connection
//! writer pool, so concurrent transitions serialize and a failed precondition
//! rolls back every partial write.

pub mod ledger;
pub mod receipt;

pub use ledger::OrderLedger;
pub use receipt::render_receipt;

use thiserror::Error;

use crate::common::AppError;

/// Ledger errors
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Table {0} not found")]
    TableNotFound(i64),

    #[error("Table {0} is not available")]
    TableNotAvailable(i64),

    #[error("An open order already exists for table {0}")]
    OpenOrderExists(i64),

    #[error("Order {0} not found")]
    OrderNotFound(i64),

    #[error("Order {0} is already closed")]
    OrderAlreadyClosed(i64),

    #[error("Food {0} not found")]
    FoodNotFound(i64),

    #[error("Quantity must be at least 1, got {0}")]
    InvalidQuantity(i64),

    #[error("Receipt is available only for closed orders (order {0})")]
    OrderNotClosed(i64),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::TableNotFound(_) | LedgerError::OrderNotFound(_) => {
                AppError::not_found(err.to_string())
            }
            LedgerError::FoodNotFound(_) => AppError::not_found(err.to_string()),
            LedgerError::TableNotAvailable(_)
            | LedgerError::OpenOrderExists(_)
            | LedgerError::OrderAlreadyClosed(_)
            | LedgerError::OrderNotClosed(_) => AppError::conflict(err.to_string()),
            LedgerError::InvalidQuantity(_) => AppError::validation(err.to_string()),
            LedgerError::Database(e) => AppError::database(e.to_string()),
        }
    }
}
