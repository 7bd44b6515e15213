//! Client registry and user directory - tenant-scoped identity lookups.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::models::{Client, UserAccount};
use crate::services::error::StoreError;

/// Existence checks for OAuth clients within a tenant.
#[async_trait]
pub trait ClientRegistry: Send + Sync {
    async fn exists(&self, client_id: &str, tenant_id: Uuid) -> Result<bool, StoreError>;
}

/// Lookup of user accounts by id within a tenant.
///
/// A user stored under a different tenant resolves to `None`: absence and
/// cross-tenant presence are indistinguishable to callers.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_id(
        &self,
        user_id: Uuid,
        tenant_id: Uuid,
    ) -> Result<Option<UserAccount>, StoreError>;
}

/// In-memory client registry.
#[derive(Default)]
pub struct InMemoryClientRegistry {
    clients: DashMap<(Uuid, String), Client>,
}

impl InMemoryClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, client: Client) {
        self.clients
            .insert((client.tenant_id, client.client_id.clone()), client);
    }
}

#[async_trait]
impl ClientRegistry for InMemoryClientRegistry {
    async fn exists(&self, client_id: &str, tenant_id: Uuid) -> Result<bool, StoreError> {
        Ok(self
            .clients
            .contains_key(&(tenant_id, client_id.to_string())))
    }
}

/// In-memory user directory.
#[derive(Default)]
pub struct InMemoryUserDirectory {
    users: DashMap<(Uuid, Uuid), UserAccount>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, user: UserAccount) {
        self.users.insert((user.tenant_id, user.user_id), user);
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_id(
        &self,
        user_id: Uuid,
        tenant_id: Uuid,
    ) -> Result<Option<UserAccount>, StoreError> {
        Ok(self
            .users
            .get(&(tenant_id, user_id))
            .map(|entry| entry.value().clone()))
    }
}
