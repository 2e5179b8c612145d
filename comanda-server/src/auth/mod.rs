//! Authentication and authorization
//!
//! - [`JwtService`] — token issue/verify
//! - [`CurrentUser`] — authenticated caller context
//! - [`require_auth`] — authentication middleware
//! - [`require_role`] — per-route role allow-lists
//!
//! Authorization is decided entirely at the router boundary: handlers and the
//! order ledger receive an already-authorized request and never inspect roles.

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use middleware::{require_auth, require_role};

use serde::{Deserialize, Serialize};

/// Closed set of staff roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Waiter,
    Cashier,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Waiter => write!(f, "waiter"),
            Role::Cashier => write!(f, "cashier"),
        }
    }
}

/// Authenticated caller, injected into request extensions by [`require_auth`]
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

impl TryFrom<Claims> for CurrentUser {
    type Error = std::num::ParseIntError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        Ok(Self {
            id: claims.sub.parse()?,
            username: claims.username,
            role: claims.role,
        })
    }
}
