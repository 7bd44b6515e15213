//! Autologin code redemption.
//!
//! Resolves a single-use code into an authenticated principal without a
//! password credential. Every internal failure kind is collapsed to the
//! same generic invalid-credentials condition at the service boundary; the
//! specific kind survives only in structured diagnostics.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::models::{AuthenticatedPrincipal, AuthnMethod, CodeIntent, TenantContext};
use crate::services::codes::ExpiringCodeStore;
use crate::services::directory::{ClientRegistry, UserDirectory};
use crate::services::error::StoreError;

/// Redemption failures. Internal taxonomy only: callers surface all of
/// these as invalid credentials (see `ServiceError::from`).
#[derive(Error, Debug)]
pub enum AutologinError {
    #[error("code is expired, unknown, or already redeemed")]
    ExpiredOrInvalidCode,

    #[error("code payload is not a string-to-string map")]
    MalformedCodeData(#[source] serde_json::Error),

    #[error("code was not issued for autologin")]
    WrongIntent,

    #[error("code payload carries no client_id")]
    ClientIdMissing,

    #[error("client referenced by the code does not exist in this tenant")]
    ClientNotFound,

    #[error("user referenced by the code does not exist in this tenant")]
    UserNotFound,

    #[error("presenting client does not match the client bound to the code")]
    ClientMismatch,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AutologinError {
    /// Stable tag for structured diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            AutologinError::ExpiredOrInvalidCode => "expired_or_invalid_code",
            AutologinError::MalformedCodeData(_) => "malformed_code_data",
            AutologinError::WrongIntent => "wrong_intent",
            AutologinError::ClientIdMissing => "client_id_missing",
            AutologinError::ClientNotFound => "client_not_found",
            AutologinError::UserNotFound => "user_not_found",
            AutologinError::ClientMismatch => "client_mismatch",
            AutologinError::Store(_) => "store_error",
        }
    }
}

/// Redeems expiring codes into authenticated principals.
#[derive(Clone)]
pub struct AutologinResolver {
    codes: Arc<dyn ExpiringCodeStore>,
    clients: Arc<dyn ClientRegistry>,
    users: Arc<dyn UserDirectory>,
}

impl AutologinResolver {
    pub fn new(
        codes: Arc<dyn ExpiringCodeStore>,
        clients: Arc<dyn ClientRegistry>,
        users: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            codes,
            clients,
            users,
        }
    }

    /// Redeem `code` within `tenant` on behalf of `presented_client_id`.
    ///
    /// The store invalidates the code on retrieval, so a failure in any
    /// later step still consumes it. `presented_client_id` comes from the
    /// caller's request context, independent of the code payload; the two
    /// must name the same client or the redemption is rejected.
    #[tracing::instrument(
        skip(self, tenant, code),
        fields(tenant_id = %tenant.tenant_id())
    )]
    pub async fn redeem(
        &self,
        tenant: &TenantContext,
        code: &str,
        presented_client_id: &str,
    ) -> Result<AuthenticatedPrincipal, AutologinError> {
        let tenant_id = tenant.tenant_id();

        let expiring_code = self
            .codes
            .redeem_once(code, tenant_id)
            .await?
            .ok_or_else(|| rejected(AutologinError::ExpiredOrInvalidCode))?;

        let code_data: HashMap<String, String> = serde_json::from_str(&expiring_code.data)
            .map_err(|e| rejected(AutologinError::MalformedCodeData(e)))?;

        if !is_autologin_code(
            expiring_code.intent.as_deref(),
            code_data.get("action").map(String::as_str),
        ) {
            return Err(rejected(AutologinError::WrongIntent));
        }

        // Structural validity before any further store lookups.
        let client_id = code_data
            .get("client_id")
            .ok_or_else(|| rejected(AutologinError::ClientIdMissing))?;

        if !self.clients.exists(client_id, tenant_id).await? {
            return Err(rejected(AutologinError::ClientNotFound));
        }

        let user_id = code_data
            .get("user_id")
            .and_then(|raw| Uuid::parse_str(raw).ok())
            .ok_or_else(|| rejected(AutologinError::UserNotFound))?;

        let user = self
            .users
            .find_by_id(user_id, tenant_id)
            .await?
            .ok_or_else(|| rejected(AutologinError::UserNotFound))?;

        if client_id != presented_client_id {
            return Err(rejected(AutologinError::ClientMismatch));
        }

        tracing::info!(
            user_id = %user.user_id,
            client_id = %client_id,
            "Autologin code redeemed"
        );

        Ok(AuthenticatedPrincipal::standard_user(
            &user,
            client_id.as_str(),
            AuthnMethod::Autologin,
        ))
    }
}

/// Log the specific kind before it is collapsed at the service boundary.
fn rejected(err: AutologinError) -> AutologinError {
    tracing::debug!(kind = err.kind(), error = %err, "Autologin redemption rejected");
    err
}

/// A code counts as autologin if either its intent tag or its payload
/// `action` entry says so. Codes from the older issuance path carry only
/// the action entry.
fn is_autologin_code(intent: Option<&str>, action: Option<&str>) -> bool {
    let expected = CodeIntent::Autologin.as_str();
    intent == Some(expected) || action == Some(expected)
}
