//! Authenticated principal model - the output of a successful redemption.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserAccount;

/// The fixed authority set granted to ordinary users.
pub const STANDARD_USER_AUTHORITIES: [&str; 2] = ["user", "openid"];

/// How a principal was authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthnMethod {
    Password,
    Autologin,
}

/// A fully authenticated principal, constructed fresh per successful
/// authentication and never persisted here.
///
/// Autologin principals are terminal: the code credential was consumed
/// during redemption, so there is nothing left to re-challenge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedPrincipal {
    pub user_id: Uuid,
    pub tenant_id: Uuid,
    pub authorities: Vec<String>,
    /// The client through which the authentication was performed.
    pub client_id: String,
    pub method: AuthnMethod,
}

impl AuthenticatedPrincipal {
    /// Build a principal for `user` carrying the standard user authority
    /// set, regardless of the authorities stored on the account.
    pub fn standard_user(
        user: &UserAccount,
        client_id: impl Into<String>,
        method: AuthnMethod,
    ) -> Self {
        Self {
            user_id: user.user_id,
            tenant_id: user.tenant_id,
            authorities: STANDARD_USER_AUTHORITIES
                .iter()
                .map(|a| a.to_string())
                .collect(),
            client_id: client_id.into(),
            method,
        }
    }

    /// Terminal principals carry no re-challengeable credential.
    pub fn is_terminal(&self) -> bool {
        matches!(self.method, AuthnMethod::Autologin)
    }
}
