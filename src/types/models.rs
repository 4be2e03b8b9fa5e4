use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Surrogate key of an account, assigned by the store on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub i64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    /// Argon2id PHC string. Never leaves the server.
    #[serde(skip)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// The single current reading position for one (account, document) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressRecord {
    #[serde(skip)]
    pub account_id: AccountId,
    #[serde(skip)]
    pub document: String,
    pub progress: String,
    /// Client-owned value, stored as sent.
    pub percentage: f64,
    pub device: String,
    pub device_id: String,
    /// Seconds since the epoch, stamped by the server when the write was accepted.
    pub timestamp: i64,
}
