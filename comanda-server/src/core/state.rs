//! Shared application state

use std::sync::Arc;

use crate::auth::{JwtConfig, JwtService};
use crate::core::Config;
use crate::db::DbService;
use crate::orders::OrderLedger;

/// Shared application state — cheap to clone, one `Arc` hop per service.
#[derive(Clone)]
pub struct AppState {
    /// Database pools (reader + serialized writer)
    pub db: DbService,
    /// Order lifecycle state machine
    pub ledger: OrderLedger,
    /// JWT issue/verify service
    pub jwt: Arc<JwtService>,
}

impl AppState {
    pub fn new(config: &Config, db: DbService) -> Self {
        let jwt = Arc::new(JwtService::new(JwtConfig {
            secret: config.jwt_secret.clone(),
            expiration_minutes: config.jwt_expiration_minutes,
            issuer: "comanda-server".to_string(),
        }));
        let ledger = OrderLedger::new(db.clone());
        Self { db, ledger, jwt }
    }
}
