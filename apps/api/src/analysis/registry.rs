//! Registry verifier — answers whether a domain is registered and since when.
//!
//! The analysis core only sees the `RegistryVerifier` trait. `RdapRegistry` is the
//! production backend: an RDAP-over-HTTPS client with bounded retry on 429/5xx.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::analysis::models::RegistrationDate;

pub const DEFAULT_RDAP_BASE_URL: &str = "https://rdap.org/domain/";
const MAX_ATTEMPTS: u32 = 2;
const RETRY_BASE_DELAY_MS: u64 = 250;
const REGISTRATION_EVENT: &str = "registration";

#[derive(Debug, Error)]
pub enum LookupFailure {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("registry returned status {0}")]
    Status(u16),

    #[error("malformed registry response: {0}")]
    Parse(String),

    #[error("lookup timed out after {0:?}")]
    Timeout(Duration),
}

/// What the registry knows about a domain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistryRecord {
    pub registered: bool,
    /// Historical registration dates, oldest record first when the registry orders them.
    pub registration_dates: Vec<RegistrationDate>,
}

/// Pluggable registry backend, carried as `Arc<dyn RegistryVerifier>`.
#[async_trait]
pub trait RegistryVerifier: Send + Sync {
    async fn lookup(&self, domain: &str) -> Result<RegistryRecord, LookupFailure>;
}

// ────────────────────────────────────────────────────────────────────────────
// RDAP backend
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RdapDomain {
    ldh_name: Option<String>,
    handle: Option<String>,
    #[serde(default)]
    events: Vec<RdapEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RdapEvent {
    event_action: String,
    event_date: Option<String>,
}

#[derive(Clone)]
pub struct RdapRegistry {
    client: Client,
    base_url: String,
    attempt_timeout: Duration,
}

impl RdapRegistry {
    /// `lookup_budget` is the whole time allowed for one lookup, retries included.
    pub fn new(base_url: &str, lookup_budget: Duration) -> Result<Self, reqwest::Error> {
        let attempt_timeout = attempt_timeout(lookup_budget);
        let client = Client::builder()
            .user_agent(format!("offerguard/{}", env!("CARGO_PKG_VERSION")))
            .timeout(attempt_timeout)
            .build()?;
        let base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        Ok(Self {
            client,
            base_url,
            attempt_timeout,
        })
    }

    fn url_for(&self, domain: &str) -> String {
        format!("{}{}", self.base_url, domain.to_lowercase())
    }
}

#[async_trait]
impl RegistryVerifier for RdapRegistry {
    async fn lookup(&self, domain: &str) -> Result<RegistryRecord, LookupFailure> {
        let url = self.url_for(domain);
        let mut last_error: Option<LookupFailure> = None;

        for attempt in 0..MAX_ATTEMPTS {
            if attempt > 0 {
                let delay = retry_delay(attempt);
                warn!(
                    "RDAP lookup for {domain} failed (attempt {attempt}), retrying after {}ms...",
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self
                .client
                .get(&url)
                .header("accept", "application/rdap+json")
                .send()
                .await
            {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LookupFailure::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status == StatusCode::NOT_FOUND {
                debug!("RDAP has no record for {domain}");
                return Ok(RegistryRecord::default());
            }

            if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                last_error = Some(LookupFailure::Status(status.as_u16()));
                continue;
            }

            if !status.is_success() {
                return Err(LookupFailure::Status(status.as_u16()));
            }

            let body = response.text().await?;
            let parsed: RdapDomain = serde_json::from_str(&body)
                .map_err(|e| LookupFailure::Parse(e.to_string()))?;

            return Ok(record_from_rdap(parsed));
        }

        Err(last_error.unwrap_or(LookupFailure::Status(StatusCode::TOO_MANY_REQUESTS.as_u16())))
    }
}

fn retry_delay(attempt: u32) -> Duration {
    Duration::from_millis(RETRY_BASE_DELAY_MS << (attempt - 1))
}

/// Splits the lookup budget so every attempt and the backoff between them
/// fit inside it.
fn attempt_timeout(lookup_budget: Duration) -> Duration {
    let backoff: Duration = (1..MAX_ATTEMPTS).map(retry_delay).sum();
    lookup_budget.saturating_sub(backoff) / MAX_ATTEMPTS
}

/// A response naming the domain counts as a registration; its dates come from
/// the `registration` events.
fn record_from_rdap(domain: RdapDomain) -> RegistryRecord {
    let registered = domain.ldh_name.is_some() || domain.handle.is_some();
    let registration_dates = domain
        .events
        .iter()
        .filter(|e| e.event_action.eq_ignore_ascii_case(REGISTRATION_EVENT))
        .filter_map(|e| e.event_date.as_deref())
        .map(RegistrationDate::parse)
        .collect();

    RegistryRecord {
        registered,
        registration_dates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn parse(body: &str) -> RegistryRecord {
        record_from_rdap(serde_json::from_str(body).unwrap())
    }

    #[test]
    fn test_registration_event_becomes_date() {
        let record = parse(
            r#"{
                "objectClassName": "domain",
                "ldhName": "EXAMPLE.COM",
                "events": [
                    {"eventAction": "registration", "eventDate": "1995-08-14T04:00:00Z"},
                    {"eventAction": "expiration", "eventDate": "2030-08-13T04:00:00Z"}
                ]
            }"#,
        );
        assert!(record.registered);
        assert_eq!(
            record.registration_dates,
            vec![RegistrationDate::Timestamp(
                Utc.with_ymd_and_hms(1995, 8, 14, 4, 0, 0).unwrap()
            )]
        );
    }

    #[test]
    fn test_unparseable_date_is_kept_raw() {
        let record = parse(
            r#"{"ldhName": "example.org",
                "events": [{"eventAction": "registration", "eventDate": "14/08/1995"}]}"#,
        );
        assert_eq!(
            record.registration_dates,
            vec![RegistrationDate::Unparsed("14/08/1995".to_string())]
        );
    }

    #[test]
    fn test_missing_events_means_no_dates() {
        let record = parse(r#"{"handle": "2336799_DOMAIN_COM-VRSN"}"#);
        assert!(record.registered);
        assert!(record.registration_dates.is_empty());
    }

    #[test]
    fn test_response_without_domain_is_not_registered() {
        let record = parse(r#"{"events": []}"#);
        assert!(!record.registered);
    }

    #[test]
    fn test_attempts_and_backoff_fit_in_budget() {
        let budget = Duration::from_secs(5);
        let registry = RdapRegistry::new("https://rdap.example/", budget).unwrap();
        assert_eq!(registry.attempt_timeout, Duration::from_millis(2375));

        let backoff: Duration = (1..MAX_ATTEMPTS).map(retry_delay).sum();
        assert!(registry.attempt_timeout * MAX_ATTEMPTS + backoff <= budget);
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let registry = RdapRegistry::new("https://rdap.example", Duration::from_secs(1)).unwrap();
        assert_eq!(registry.url_for("Acme.COM"), "https://rdap.example/acme.com");
    }
}
