//! Services layer for the authentication decision core.
//!
//! Store contracts (with in-memory implementations) and the two decision
//! services built on top of them.

pub mod audit;
pub mod autologin;
pub mod codes;
pub mod directory;
pub mod error;
pub mod login_policy;

pub use audit::{AuditEventSource, InMemoryAuditLog};
pub use autologin::{AutologinError, AutologinResolver};
pub use codes::{ExpiringCodeStore, InMemoryCodeStore};
pub use directory::{ClientRegistry, InMemoryClientRegistry, InMemoryUserDirectory, UserDirectory};
pub use error::{ServiceError, StoreError};
pub use login_policy::LoginPolicy;
