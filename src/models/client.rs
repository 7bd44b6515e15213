//! OAuth client model - registry entries scoped to a tenant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registered OAuth client. The decision core only ever checks existence;
/// no other attributes are read here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub client_id: String,
    pub tenant_id: Uuid,
    pub created_utc: DateTime<Utc>,
}

impl Client {
    /// Create a new client registration.
    pub fn new(client_id: impl Into<String>, tenant_id: Uuid) -> Self {
        Self {
            client_id: client_id.into(),
            tenant_id,
            created_utc: Utc::now(),
        }
    }
}
