//! Multi-tenant authentication decision core.
//!
//! Two decision services sit at the center of this crate:
//!
//! - [`services::LoginPolicy`] replays the tenant-scoped audit trail to
//!   decide whether a principal may attempt to authenticate, applying a
//!   time-windowed sequential failure streak and a lockout period.
//! - [`services::AutologinResolver`] redeems a single-use expiring code
//!   into an [`models::AuthenticatedPrincipal`], validating expiry, intent,
//!   and the binding between the code and the presenting client.
//!
//! External collaborators - the audit trail, the expiring code store, the
//! client registry, and the user directory - are consumed through async
//! traits. In-memory implementations back the tests and small deployments.
//! Every query is scoped by an explicit [`models::TenantContext`]; there is
//! no default tenant.
//!
//! The surrounding web surface (controllers, protocol adapters, mail,
//! sessions) lives elsewhere and talks to this crate through the service
//! types above.

pub mod config;
pub mod models;
pub mod observability;
pub mod services;
