//! Expiring code store - single-use redemption tokens.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use rand::Rng;
use uuid::Uuid;

use crate::models::ExpiringCode;
use crate::services::error::StoreError;

/// Atomic fetch-and-invalidate access to single-use codes.
///
/// The contract requires at-most-one successful redemption per code: lookup
/// and invalidation must be a single operation at the store layer (a
/// conditional delete, compare-and-swap, or equivalent). "Not found",
/// "already consumed", and "expired" are all `None` - callers cannot tell
/// them apart, and must not try.
#[async_trait]
pub trait ExpiringCodeStore: Send + Sync {
    async fn redeem_once(
        &self,
        code: &str,
        tenant_id: Uuid,
    ) -> Result<Option<ExpiringCode>, StoreError>;
}

/// In-memory code store. Redemption removes the map entry, which is the
/// fetch-and-invalidate: two concurrent redemptions race on the key and
/// only one receives the value.
#[derive(Default)]
pub struct InMemoryCodeStore {
    codes: DashMap<(Uuid, String), ExpiringCode>,
}

impl InMemoryCodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new code with an opaque random token.
    pub fn issue(
        &self,
        tenant_id: Uuid,
        data: String,
        intent: Option<String>,
        expiry_utc: DateTime<Utc>,
    ) -> ExpiringCode {
        let code = generate_code();
        let entry = ExpiringCode::new(code.clone(), tenant_id, data, intent, expiry_utc);
        self.codes.insert((tenant_id, code), entry.clone());
        entry
    }

    /// Insert a pre-built code, for issuing flows that mint their own
    /// tokens.
    pub fn insert(&self, code: ExpiringCode) {
        self.codes
            .insert((code.tenant_id, code.code.clone()), code);
    }
}

#[async_trait]
impl ExpiringCodeStore for InMemoryCodeStore {
    async fn redeem_once(
        &self,
        code: &str,
        tenant_id: Uuid,
    ) -> Result<Option<ExpiringCode>, StoreError> {
        let redeemed = self
            .codes
            .remove(&(tenant_id, code.to_string()))
            .map(|(_, entry)| entry);
        // An expired entry is still removed: it was dead either way.
        Ok(redeemed.filter(|c| !c.is_expired()))
    }
}

/// Generate an opaque, unguessable code token.
fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    let token_bytes: [u8; 32] = rng.gen();
    hex::encode(token_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn redeem_consumes_the_code() {
        let store = InMemoryCodeStore::new();
        let tenant = Uuid::new_v4();
        let code = store.issue(
            tenant,
            "{}".to_string(),
            Some("autologin".to_string()),
            Utc::now() + Duration::seconds(300),
        );

        let first = tokio_test::block_on(store.redeem_once(&code.code, tenant)).unwrap();
        assert!(first.is_some());

        let second = tokio_test::block_on(store.redeem_once(&code.code, tenant)).unwrap();
        assert!(second.is_none());
    }

    #[test]
    fn expired_codes_redeem_as_none() {
        let store = InMemoryCodeStore::new();
        let tenant = Uuid::new_v4();
        let code = store.issue(
            tenant,
            "{}".to_string(),
            None,
            Utc::now() - Duration::seconds(1),
        );

        let redeemed = tokio_test::block_on(store.redeem_once(&code.code, tenant)).unwrap();
        assert!(redeemed.is_none());
    }

    #[test]
    fn codes_are_invisible_to_other_tenants() {
        let store = InMemoryCodeStore::new();
        let tenant = Uuid::new_v4();
        let other = Uuid::new_v4();
        let code = store.issue(
            tenant,
            "{}".to_string(),
            None,
            Utc::now() + Duration::seconds(300),
        );

        let cross = tokio_test::block_on(store.redeem_once(&code.code, other)).unwrap();
        assert!(cross.is_none());

        // The failed cross-tenant attempt must not have consumed it.
        let same = tokio_test::block_on(store.redeem_once(&code.code, tenant)).unwrap();
        assert!(same.is_some());
    }
}
