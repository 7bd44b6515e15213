use thiserror::Error;

use crate::models::TenantError;
use crate::services::autologin::AutologinError;

/// Transport failures from an external store. Domain outcomes ("not
/// found", "expired") are expressed in the store contracts themselves,
/// never here.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store backend error: {0}")]
    Backend(#[from] anyhow::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Caller-facing error taxonomy for the decision core.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Tenant error: {0}")]
    Tenant(#[from] TenantError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(anyhow::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<AutologinError> for ServiceError {
    /// Collapse every redemption failure into the same caller-visible
    /// condition so an unauthenticated caller cannot learn which step
    /// rejected the code. The specific kind has already been logged by the
    /// resolver.
    fn from(err: AutologinError) -> Self {
        match err {
            AutologinError::ExpiredOrInvalidCode
            | AutologinError::MalformedCodeData(_)
            | AutologinError::WrongIntent
            | AutologinError::ClientIdMissing
            | AutologinError::ClientNotFound
            | AutologinError::UserNotFound
            | AutologinError::ClientMismatch => ServiceError::InvalidCredentials,
            AutologinError::Store(e) => ServiceError::Store(e),
        }
    }
}
