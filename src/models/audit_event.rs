//! Audit event model - read-side view of the authentication audit trail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Audit event types recorded by the authentication subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventType {
    UserAuthenticationSuccess,
    UserAuthenticationFailure,
    ClientAuthenticationSuccess,
    ClientAuthenticationFailure,
    UserAccountLocked,
}

impl AuditEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditEventType::UserAuthenticationSuccess => "user_authentication_success",
            AuditEventType::UserAuthenticationFailure => "user_authentication_failure",
            AuditEventType::ClientAuthenticationSuccess => "client_authentication_success",
            AuditEventType::ClientAuthenticationFailure => "client_authentication_failure",
            AuditEventType::UserAccountLocked => "user_account_locked",
        }
    }
}

/// One entry of the tenant-scoped authentication audit trail.
///
/// Events are appended by the login flow on every attempt and consumed
/// read-only here. Trail queries return them most recent first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    pub event_id: Uuid,
    pub principal_id: String,
    pub tenant_id: Uuid,
    pub event_type: AuditEventType,
    pub occurred_utc: DateTime<Utc>,
}

impl AuditEvent {
    /// Create a new audit event.
    pub fn new(
        event_type: AuditEventType,
        principal_id: impl Into<String>,
        tenant_id: Uuid,
        occurred_utc: DateTime<Utc>,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            principal_id: principal_id.into(),
            tenant_id,
            event_type,
            occurred_utc,
        }
    }
}
