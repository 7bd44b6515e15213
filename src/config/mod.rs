//! Environment-driven configuration for the decision core.
//!
//! Values come from the environment (optionally via a `.env` file) with
//! defaults in dev; production requires every variable to be explicit.

use serde::Deserialize;
use std::env;

use crate::models::LockoutPolicy;
use crate::services::ServiceError;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    Prod,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthnConfig {
    pub environment: Environment,
    pub service_name: String,
    pub log_level: String,
    pub lockout: LockoutConfig,
    pub codes: CodeConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LockoutConfig {
    pub enabled: bool,
    pub count_failures_within_seconds: i64,
    pub lockout_after_failures: u32,
    pub lockout_period_seconds: i64,
}

impl LockoutConfig {
    /// Policy handed to each evaluation. Supplied per call; the evaluator
    /// never caches it.
    pub fn policy(&self) -> LockoutPolicy {
        LockoutPolicy::new(
            self.count_failures_within_seconds,
            self.lockout_after_failures,
            self.lockout_period_seconds,
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CodeConfig {
    /// Lifetime of newly issued autologin codes.
    pub expiry_seconds: i64,
}

impl AuthnConfig {
    pub fn from_env() -> Result<Self, ServiceError> {
        dotenvy::dotenv().ok();

        let env_str = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string());
        let is_prod = env_str.eq_ignore_ascii_case("prod");
        let environment = if is_prod {
            Environment::Prod
        } else {
            Environment::Dev
        };

        Ok(Self {
            environment,
            service_name: get_env("SERVICE_NAME", Some("authn-core"), is_prod)?,
            log_level: get_env("LOG_LEVEL", Some("info"), is_prod)?,
            lockout: LockoutConfig {
                enabled: parse_env("LOCKOUT_ENABLED", Some("true"), is_prod)?,
                count_failures_within_seconds: parse_env(
                    "LOCKOUT_COUNT_FAILURES_WITHIN_SECONDS",
                    Some("3600"),
                    is_prod,
                )?,
                lockout_after_failures: parse_env("LOCKOUT_AFTER_FAILURES", Some("5"), is_prod)?,
                lockout_period_seconds: parse_env("LOCKOUT_PERIOD_SECONDS", Some("300"), is_prod)?,
            },
            codes: CodeConfig {
                expiry_seconds: parse_env("AUTOLOGIN_CODE_EXPIRY_SECONDS", Some("300"), is_prod)?,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, strict: bool) -> Result<String, ServiceError> {
    match env::var(key) {
        Ok(value) => Ok(value),
        Err(_) => match default {
            Some(d) if !strict => Ok(d.to_string()),
            _ => Err(ServiceError::Config(anyhow::anyhow!(
                "Missing required environment variable: {}",
                key
            ))),
        },
    }
}

fn parse_env<T>(key: &str, default: Option<&str>, strict: bool) -> Result<T, ServiceError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env(key, default, strict)?.parse().map_err(|e: T::Err| {
        ServiceError::Config(anyhow::anyhow!("Invalid value for {}: {}", key, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dev_defaults_produce_an_enforceable_policy() {
        let config = AuthnConfig::from_env().expect("dev config should load from defaults");
        assert_eq!(config.environment, Environment::Dev);
        assert!(config.lockout.enabled);

        let policy = config.lockout.policy();
        assert!(policy.is_enforceable());
        assert_eq!(policy.lockout_after_failures, 5);
    }
}
