//! Lockout policy model - tenant-configurable brute force thresholds.

use serde::{Deserialize, Serialize};

/// Tenant-configurable lockout policy, supplied on every evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockoutPolicy {
    /// Failures are counted within this many seconds before the evaluation
    /// instant.
    pub count_failures_within_seconds: i64,
    /// Number of sequential failures at which the account locks.
    pub lockout_after_failures: u32,
    /// How long a lockout holds after the most recent failure.
    pub lockout_period_seconds: i64,
}

impl LockoutPolicy {
    pub fn new(
        count_failures_within_seconds: i64,
        lockout_after_failures: u32,
        lockout_period_seconds: i64,
    ) -> Self {
        Self {
            count_failures_within_seconds,
            lockout_after_failures,
            lockout_period_seconds,
        }
    }

    /// A policy with a negative window cannot be enforced and is treated the
    /// same as a disabled evaluator.
    pub fn is_enforceable(&self) -> bool {
        self.count_failures_within_seconds >= 0 && self.lockout_period_seconds >= 0
    }
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            count_failures_within_seconds: 3600,
            lockout_after_failures: 5,
            lockout_period_seconds: 300,
        }
    }
}

/// Outcome of a lockout evaluation. Transient, never persisted.
///
/// `failure_count` is informational even when the attempt is allowed: a
/// count above the threshold with an expired lockout period still reports
/// the historical streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockoutDecision {
    pub allowed: bool,
    pub failure_count: u32,
}

impl LockoutDecision {
    pub fn new(allowed: bool, failure_count: u32) -> Self {
        Self {
            allowed,
            failure_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_enforceable() {
        assert!(LockoutPolicy::default().is_enforceable());
    }

    #[test]
    fn negative_windows_are_not_enforceable() {
        assert!(!LockoutPolicy::new(-1, 5, 300).is_enforceable());
        assert!(!LockoutPolicy::new(3600, 5, -1).is_enforceable());
    }
}
