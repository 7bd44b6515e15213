//! Expiring code model - single-use, time-limited redemption tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Intents a code can be issued for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeIntent {
    Autologin,
    PasswordReset,
    EmailVerification,
    Invitation,
}

impl CodeIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            CodeIntent::Autologin => "autologin",
            CodeIntent::PasswordReset => "password_reset",
            CodeIntent::EmailVerification => "email_verification",
            CodeIntent::Invitation => "invitation",
        }
    }
}

/// Expiring code entity (tenant-scoped).
///
/// `data` is an opaque JSON payload written by the issuing flow; redemption
/// parses it as a string-to-string map. `intent` is optional because codes
/// from the older issuance path carry their purpose only in the payload's
/// `action` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpiringCode {
    pub code: String,
    pub tenant_id: Uuid,
    pub data: String,
    pub intent: Option<String>,
    pub expiry_utc: DateTime<Utc>,
    pub created_utc: DateTime<Utc>,
}

impl ExpiringCode {
    /// Create a new expiring code.
    pub fn new(
        code: String,
        tenant_id: Uuid,
        data: String,
        intent: Option<String>,
        expiry_utc: DateTime<Utc>,
    ) -> Self {
        Self {
            code,
            tenant_id,
            data,
            intent,
            expiry_utc,
            created_utc: Utc::now(),
        }
    }

    /// Check if the code has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expiry_utc
    }
}
