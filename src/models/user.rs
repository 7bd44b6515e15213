//! User account model - tenant-scoped directory entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User account as resolved from the user directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub user_id: Uuid,
    pub tenant_id: Uuid,
    pub email: String,
    pub authorities: Vec<String>,
    pub created_utc: DateTime<Utc>,
}

impl UserAccount {
    /// Create a new user account with the standard authority set.
    pub fn new(tenant_id: Uuid, email: impl Into<String>) -> Self {
        Self {
            user_id: Uuid::new_v4(),
            tenant_id,
            email: email.into(),
            authorities: super::principal::STANDARD_USER_AUTHORITIES
                .iter()
                .map(|a| a.to_string())
                .collect(),
            created_utc: Utc::now(),
        }
    }
}
