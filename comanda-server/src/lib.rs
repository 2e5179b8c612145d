//! Comanda Server — restaurant point-of-sale backend
//!
//! # Architecture
//!
//! - **api**: HTTP routes and handlers (axum)
//! - **auth**: JWT access gate and role allow-lists
//! - **db**: SQLite pools, migrations, catalog/table/staff queries
//! - **orders**: the order ledger — lifecycle state machine and receipts
//!
//! # Module structure
//!
//! ```text
//! comanda-server/src/
//! ├── core/      # configuration, shared state
//! ├── common/    # errors, response envelope, logging, pagination
//! ├── auth/      # JWT, roles, middleware
//! ├── db/        # pools, models, queries, seeding
//! ├── orders/    # order ledger + receipt projection
//! └── api/       # HTTP routes and handlers
//! ```

pub mod api;
pub mod auth;
pub mod common;
pub mod core;
pub mod db;
pub mod orders;

// Re-export public types
pub use auth::{CurrentUser, JwtService, Role};
pub use common::{ApiResponse, AppError, AppResult};
pub use crate::core::{AppState, Config};
pub use db::DbService;
pub use orders::{LedgerError, OrderLedger};
