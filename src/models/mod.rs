pub mod audit_event;
pub mod client;
pub mod expiring_code;
pub mod lockout;
pub mod principal;
pub mod tenant;
pub mod user;

pub use audit_event::{AuditEvent, AuditEventType};
pub use client::Client;
pub use expiring_code::{CodeIntent, ExpiringCode};
pub use lockout::{LockoutDecision, LockoutPolicy};
pub use principal::{AuthenticatedPrincipal, AuthnMethod, STANDARD_USER_AUTHORITIES};
pub use tenant::{TenantContext, TenantError};
pub use user::UserAccount;
