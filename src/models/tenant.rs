//! Tenant context - explicit tenant scoping for every query.

use uuid::Uuid;

/// Request-scoped tenant identifier threaded through all store queries.
///
/// There is no default tenant: when resolution fails, the calling request
/// fails rather than falling back to a shared partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantContext {
    tenant_id: Uuid,
}

impl TenantContext {
    pub fn new(tenant_id: Uuid) -> Self {
        Self { tenant_id }
    }

    pub fn tenant_id(&self) -> Uuid {
        self.tenant_id
    }

    /// Resolve from an optionally-present identifier. Absence is an error,
    /// never a fallback.
    pub fn resolve(claimed: Option<Uuid>) -> Result<Self, TenantError> {
        claimed.map(Self::new).ok_or(TenantError::Missing)
    }

    /// Parse a tenant identifier from its textual form.
    pub fn parse(raw: &str) -> Result<Self, TenantError> {
        Uuid::parse_str(raw)
            .map(Self::new)
            .map_err(|e| TenantError::Invalid(e.to_string()))
    }
}

/// Errors related to tenant context resolution.
#[derive(Debug, Clone)]
pub enum TenantError {
    /// No tenant identifier present on the request.
    Missing,
    /// Tenant identifier present but unusable.
    Invalid(String),
}

impl std::fmt::Display for TenantError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TenantError::Missing => write!(f, "Tenant context not found"),
            TenantError::Invalid(msg) => write!(f, "Invalid tenant context: {}", msg),
        }
    }
}

impl std::error::Error for TenantError {}
