use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account document in the user store, keyed by username.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    #[serde(rename = "_id")]
    pub username: String,
    pub password_hash: String,
    pub salt: String,
    /// Read operations only; mutations are rejected.
    pub readonly: bool,
    pub created_at: DateTime<Utc>,
}
