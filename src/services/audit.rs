//! Audit trail source - read access to the authentication audit trail.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use crate::models::AuditEvent;
use crate::services::error::StoreError;

/// Read access to the tenant-scoped, append-only authentication audit
/// trail. The trail is written by the login flow; this core only queries.
#[async_trait]
pub trait AuditEventSource: Send + Sync {
    /// Find events for `principal_id` with `occurred_utc >= since`, scoped
    /// to one tenant and ordered most recent first.
    async fn find(
        &self,
        principal_id: &str,
        since: DateTime<Utc>,
        tenant_id: Uuid,
    ) -> Result<Vec<AuditEvent>, StoreError>;
}

/// In-memory audit trail keyed by tenant and principal.
#[derive(Default)]
pub struct InMemoryAuditLog {
    events: DashMap<(Uuid, String), Vec<AuditEvent>>,
}

impl InMemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event. The calling flow records the outcome of an attempt
    /// before evaluating the lockout policy for the next one.
    pub fn record(&self, event: AuditEvent) {
        self.events
            .entry((event.tenant_id, event.principal_id.clone()))
            .or_default()
            .push(event);
    }
}

#[async_trait]
impl AuditEventSource for InMemoryAuditLog {
    async fn find(
        &self,
        principal_id: &str,
        since: DateTime<Utc>,
        tenant_id: Uuid,
    ) -> Result<Vec<AuditEvent>, StoreError> {
        let mut events: Vec<AuditEvent> = self
            .events
            .get(&(tenant_id, principal_id.to_string()))
            .map(|entry| {
                entry
                    .iter()
                    .filter(|e| e.occurred_utc >= since)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        events.sort_by(|a, b| b.occurred_utc.cmp(&a.occurred_utc));
        Ok(events)
    }
}
