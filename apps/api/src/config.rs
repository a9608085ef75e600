use std::time::Duration;

use anyhow::{Context, Result};

use crate::analysis::registry::DEFAULT_RDAP_BASE_URL;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub rdap_base_url: String,
    pub registry_timeout: Duration,
    pub max_upload_bytes: usize,
    /// Permissive CORS when unset.
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            rdap_base_url: std::env::var("RDAP_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_RDAP_BASE_URL.to_string()),
            registry_timeout: Duration::from_secs(parse_env("REGISTRY_TIMEOUT_SECS", 5)?),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            cors_allowed_origin: std::env::var("CORS_ALLOWED_ORIGIN")
                .ok()
                .filter(|v| !v.trim().is_empty()),
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_default_when_unset() {
        let value: u64 = parse_env("OFFERGUARD_TEST_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("OFFERGUARD_TEST_BAD_PORT", "eighty");
        let result: Result<u16> = parse_env("OFFERGUARD_TEST_BAD_PORT", 8080);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_env_reads_value() {
        std::env::set_var("OFFERGUARD_TEST_TIMEOUT", " 12 ");
        let value: u64 = parse_env("OFFERGUARD_TEST_TIMEOUT", 5).unwrap();
        assert_eq!(value, 12);
    }
}
