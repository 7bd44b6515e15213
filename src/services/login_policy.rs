//! Login lockout policy evaluation.
//!
//! Replays the tenant-scoped audit trail to decide whether a principal may
//! attempt to authenticate right now. The same evaluator serves user login
//! and client credential authentication; the two differ only in which audit
//! event types count as success and failure.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::models::{
    AuditEvent, AuditEventType, LockoutDecision, LockoutPolicy, TenantContext,
};
use crate::services::audit::AuditEventSource;
use crate::services::error::StoreError;

/// Read-only lockout evaluator over the audit trail.
///
/// Holds no per-principal state: every evaluation is a projection over the
/// trail, so concurrent evaluations for the same principal cannot race each
/// other. The decision is a best-effort snapshot; causal ordering against
/// the audit writer ("record the failure, then evaluate") belongs to the
/// calling flow.
#[derive(Clone)]
pub struct LoginPolicy {
    audit: Arc<dyn AuditEventSource>,
    success_event_type: AuditEventType,
    failure_event_type: AuditEventType,
    enabled: bool,
}

impl LoginPolicy {
    pub fn new(
        audit: Arc<dyn AuditEventSource>,
        success_event_type: AuditEventType,
        failure_event_type: AuditEventType,
        enabled: bool,
    ) -> Self {
        Self {
            audit,
            success_event_type,
            failure_event_type,
            enabled,
        }
    }

    /// Lockout evaluator for interactive user logins.
    pub fn for_users(audit: Arc<dyn AuditEventSource>, enabled: bool) -> Self {
        Self::new(
            audit,
            AuditEventType::UserAuthenticationSuccess,
            AuditEventType::UserAuthenticationFailure,
            enabled,
        )
    }

    /// Lockout evaluator for client credential authentication.
    pub fn for_clients(audit: Arc<dyn AuditEventSource>, enabled: bool) -> Self {
        Self::new(
            audit,
            AuditEventType::ClientAuthenticationSuccess,
            AuditEventType::ClientAuthenticationFailure,
            enabled,
        )
    }

    /// Decide whether `principal_id` may attempt to authenticate at `now`.
    ///
    /// Never produces a domain error: a disabled evaluator or an
    /// unenforceable policy yields an allow with a zero count, and the
    /// audit trail is not queried at all in that case. Only store transport
    /// failures propagate.
    #[tracing::instrument(
        skip(self, tenant, policy, now),
        fields(tenant_id = %tenant.tenant_id())
    )]
    pub async fn is_allowed(
        &self,
        tenant: &TenantContext,
        principal_id: &str,
        policy: &LockoutPolicy,
        now: DateTime<Utc>,
    ) -> Result<LockoutDecision, StoreError> {
        if !self.enabled || !policy.is_enforceable() {
            return Ok(LockoutDecision::new(true, 0));
        }

        let since = now - Duration::seconds(policy.count_failures_within_seconds);
        let events = self
            .audit
            .find(principal_id, since, tenant.tenant_id())
            .await?;

        let failure_count = self.sequential_failure_count(&events);

        if failure_count >= policy.lockout_after_failures {
            // Locked only while the most recent failure is inside the
            // lockout period; an older streak unlocks without resetting the
            // reported count.
            if let Some(last_failure) = self.most_recent_failure(&events) {
                if now - last_failure.occurred_utc
                    < Duration::seconds(policy.lockout_period_seconds)
                {
                    tracing::warn!(
                        failure_count,
                        "Authentication attempt blocked by lockout policy"
                    );
                    return Ok(LockoutDecision::new(false, failure_count));
                }
            }
        }

        Ok(LockoutDecision::new(true, failure_count))
    }

    /// Failures that occurred without an intervening success, walking the
    /// trail newest first.
    fn sequential_failure_count(&self, events: &[AuditEvent]) -> u32 {
        let mut failure_count = 0;
        for event in events {
            if event.event_type == self.failure_event_type {
                failure_count += 1;
            } else if event.event_type == self.success_event_type {
                // A success inside the window ends the streak.
                break;
            }
        }
        failure_count
    }

    fn most_recent_failure<'a>(&self, events: &'a [AuditEvent]) -> Option<&'a AuditEvent> {
        events
            .iter()
            .find(|e| e.event_type == self.failure_event_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::audit::InMemoryAuditLog;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    fn base_time() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn policy() -> LockoutPolicy {
        LockoutPolicy::new(900, 5, 300)
    }

    fn record(
        log: &InMemoryAuditLog,
        tenant: Uuid,
        event_type: AuditEventType,
        offset_seconds: i64,
    ) {
        log.record(AuditEvent::new(
            event_type,
            "alice",
            tenant,
            base_time() + Duration::seconds(offset_seconds),
        ));
    }

    struct CountingAuditSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AuditEventSource for CountingAuditSource {
        async fn find(
            &self,
            _principal_id: &str,
            _since: DateTime<Utc>,
            _tenant_id: Uuid,
        ) -> Result<Vec<AuditEvent>, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn disabled_evaluator_never_queries_the_trail() {
        let audit = Arc::new(CountingAuditSource {
            calls: AtomicUsize::new(0),
        });
        let evaluator = LoginPolicy::for_users(audit.clone(), false);
        let tenant = TenantContext::new(Uuid::new_v4());

        let decision = evaluator
            .is_allowed(&tenant, "alice", &policy(), base_time())
            .await
            .unwrap();

        assert!(decision.allowed);
        assert_eq!(decision.failure_count, 0);
        assert_eq!(audit.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unenforceable_policy_behaves_as_disabled() {
        let audit = Arc::new(CountingAuditSource {
            calls: AtomicUsize::new(0),
        });
        let evaluator = LoginPolicy::for_users(audit.clone(), true);
        let tenant = TenantContext::new(Uuid::new_v4());

        let decision = evaluator
            .is_allowed(
                &tenant,
                "alice",
                &LockoutPolicy::new(-1, 5, 300),
                base_time(),
            )
            .await
            .unwrap();

        assert!(decision.allowed);
        assert_eq!(decision.failure_count, 0);
        assert_eq!(audit.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_trail_allows_with_zero_count() {
        let log = Arc::new(InMemoryAuditLog::new());
        let evaluator = LoginPolicy::for_users(log, true);
        let tenant = TenantContext::new(Uuid::new_v4());

        let decision = evaluator
            .is_allowed(&tenant, "alice", &policy(), base_time())
            .await
            .unwrap();

        assert!(decision.allowed);
        assert_eq!(decision.failure_count, 0);
    }

    #[tokio::test]
    async fn threshold_with_fresh_failure_locks() {
        let log = Arc::new(InMemoryAuditLog::new());
        let tenant_id = Uuid::new_v4();
        for offset in [0, 10, 20, 30, 40] {
            record(
                &log,
                tenant_id,
                AuditEventType::UserAuthenticationFailure,
                offset,
            );
        }
        let evaluator = LoginPolicy::for_users(log, true);
        let tenant = TenantContext::new(tenant_id);

        let decision = evaluator
            .is_allowed(
                &tenant,
                "alice",
                &policy(),
                base_time() + Duration::seconds(50),
            )
            .await
            .unwrap();

        assert!(!decision.allowed);
        assert_eq!(decision.failure_count, 5);
    }

    #[tokio::test]
    async fn lockout_period_elapses_without_resetting_the_count() {
        let log = Arc::new(InMemoryAuditLog::new());
        let tenant_id = Uuid::new_v4();
        for offset in [0, 10, 20, 30, 40] {
            record(
                &log,
                tenant_id,
                AuditEventType::UserAuthenticationFailure,
                offset,
            );
        }
        let evaluator = LoginPolicy::for_users(log, true);
        let tenant = TenantContext::new(tenant_id);

        let decision = evaluator
            .is_allowed(
                &tenant,
                "alice",
                &policy(),
                base_time() + Duration::seconds(400),
            )
            .await
            .unwrap();

        assert!(decision.allowed);
        assert_eq!(decision.failure_count, 5);
    }

    #[tokio::test]
    async fn success_inside_the_window_resets_the_streak() {
        let log = Arc::new(InMemoryAuditLog::new());
        let tenant_id = Uuid::new_v4();
        record(&log, tenant_id, AuditEventType::UserAuthenticationFailure, 0);
        record(
            &log,
            tenant_id,
            AuditEventType::UserAuthenticationFailure,
            10,
        );
        record(
            &log,
            tenant_id,
            AuditEventType::UserAuthenticationSuccess,
            20,
        );
        record(
            &log,
            tenant_id,
            AuditEventType::UserAuthenticationFailure,
            30,
        );
        record(
            &log,
            tenant_id,
            AuditEventType::UserAuthenticationFailure,
            40,
        );
        let evaluator = LoginPolicy::for_users(log, true);
        let tenant = TenantContext::new(tenant_id);

        let decision = evaluator
            .is_allowed(
                &tenant,
                "alice",
                &policy(),
                base_time() + Duration::seconds(50),
            )
            .await
            .unwrap();

        // Only the two failures after the success count.
        assert!(decision.allowed);
        assert_eq!(decision.failure_count, 2);
    }

    #[tokio::test]
    async fn failures_outside_the_window_are_not_counted() {
        let log = Arc::new(InMemoryAuditLog::new());
        let tenant_id = Uuid::new_v4();
        // Five failures, but three fall outside the 900 second window once
        // the evaluation instant moves far enough forward.
        for offset in [0, 10, 20, 1000, 1010] {
            record(
                &log,
                tenant_id,
                AuditEventType::UserAuthenticationFailure,
                offset,
            );
        }
        let evaluator = LoginPolicy::for_users(log, true);
        let tenant = TenantContext::new(tenant_id);

        let decision = evaluator
            .is_allowed(
                &tenant,
                "alice",
                &policy(),
                base_time() + Duration::seconds(1020),
            )
            .await
            .unwrap();

        assert!(decision.allowed);
        assert_eq!(decision.failure_count, 2);
    }
}
