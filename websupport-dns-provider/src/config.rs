//! Provider configuration.

use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{ProviderError, Result};
use crate::utils::log_sanitizer::mask_secret;

/// Default Websupport REST API base URL.
pub const DEFAULT_API_BASE: &str = "https://rest.websupport.sk/v2";

/// Environment variable names read by [`WebsupportConfig::from_env`].
pub mod env {
    pub const API_KEY: &str = "WEBSUPPORT_API_KEY";
    pub const API_SECRET: &str = "WEBSUPPORT_API_SECRET";
    pub const SERVICE_ID: &str = "WEBSUPPORT_SERVICE_ID";
    pub const API_BASE: &str = "WEBSUPPORT_API_BASE";
    pub const TIMEOUT_SECS: &str = "WEBSUPPORT_TIMEOUT_SECS";
}

/// Credentials and endpoint settings for the Websupport API.
///
/// # Serialization
///
/// ```json
/// { "apiKey": "...", "apiSecret": "...", "serviceId": "1234567" }
/// ```
///
/// `apiBase` defaults to [`DEFAULT_API_BASE`]; `timeoutSecs` is optional.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsupportConfig {
    /// API key (Basic auth user name).
    pub api_key: String,
    /// API secret used as the HMAC key.
    pub api_secret: String,
    /// API base URL, without a trailing slash.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Numeric service id scoping all calls to one domain.
    pub service_id: String,
    /// Request timeout for the default HTTP client.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

impl std::fmt::Debug for WebsupportConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebsupportConfig")
            .field("api_key", &mask_secret(&self.api_key))
            .field("api_secret", &mask_secret(&self.api_secret))
            .field("api_base", &self.api_base)
            .field("service_id", &self.service_id)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl WebsupportConfig {
    /// Create a configuration against the default API base.
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        service_id: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            api_base: default_api_base(),
            service_id: service_id.into(),
            timeout_secs: None,
        }
    }

    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Request timeout, rounded up to whole seconds.
    ///
    /// `Duration::ZERO` stays zero and is rejected by [`validate`](Self::validate).
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let secs = timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0);
        self.timeout_secs = Some(secs);
        self
    }

    /// Request timeout, if one was configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Construct a configuration from a flat key-value map.
    ///
    /// Keys: `apiKey`, `apiSecret`, `serviceId`, optional `apiBase` and
    /// `timeoutSecs`.
    pub fn from_map(map: &HashMap<String, String>) -> Result<Self> {
        let config = Self {
            api_key: get_required_field(map, "apiKey")?,
            api_secret: get_required_field(map, "apiSecret")?,
            api_base: map
                .get("apiBase")
                .filter(|v| !v.trim().is_empty())
                .cloned()
                .unwrap_or_else(default_api_base),
            service_id: get_required_field(map, "serviceId")?,
            timeout_secs: map
                .get("timeoutSecs")
                .map(|v| parse_timeout("timeoutSecs", v))
                .transpose()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Construct a configuration from `WEBSUPPORT_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &'static str| {
            lookup(key).ok_or_else(|| {
                ProviderError::invalid_config(key, "environment variable is not set")
            })
        };

        let config = Self {
            api_key: required(env::API_KEY)?,
            api_secret: required(env::API_SECRET)?,
            api_base: lookup(env::API_BASE)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(default_api_base),
            service_id: required(env::SERVICE_ID)?,
            timeout_secs: lookup(env::TIMEOUT_SECS)
                .map(|v| parse_timeout(env::TIMEOUT_SECS, &v))
                .transpose()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants every operation relies on.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("api_key", &self.api_key),
            ("api_secret", &self.api_secret),
            ("service_id", &self.service_id),
        ] {
            if value.trim().is_empty() {
                return Err(ProviderError::invalid_config(field, "must not be empty"));
            }
        }

        if !self.service_id.trim().chars().all(|c| c.is_ascii_digit()) {
            return Err(ProviderError::invalid_config(
                "service_id",
                format!("expected a numeric id, got '{}'", self.service_id),
            ));
        }

        if !(self.api_base.starts_with("http://") || self.api_base.starts_with("https://")) {
            return Err(ProviderError::invalid_config(
                "api_base",
                format!("expected an http(s) URL, got '{}'", self.api_base),
            ));
        }

        if self.timeout_secs == Some(0) {
            return Err(ProviderError::invalid_config(
                "timeout_secs",
                "must be greater than zero",
            ));
        }

        Ok(())
    }
}

/// Obtain a required field from the map and verify that it is not empty.
fn get_required_field(map: &HashMap<String, String>, key: &str) -> Result<String> {
    match map.get(key) {
        None => Err(ProviderError::invalid_config(key, "missing required field")),
        Some(v) if v.trim().is_empty() => {
            Err(ProviderError::invalid_config(key, "field must not be empty"))
        }
        Some(v) => Ok(v.trim().to_string()),
    }
}

fn parse_timeout(field: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|e| ProviderError::invalid_config(field, format!("invalid seconds: {e}")))
}

/// Identifier lookup policy after a record is created.
///
/// The create endpoint returns no body, so the new record's id is recovered
/// by listing. The first listing happens after `initial_delay`; each miss
/// doubles the delay (capped at `max_delay`) until `max_attempts` listings
/// have been made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupPolicy {
    /// Wait before the first listing.
    pub initial_delay: Duration,
    /// Upper bound for a single wait.
    pub max_delay: Duration,
    /// Number of listings before giving up. Zero disables the lookup.
    pub max_attempts: u32,
}

impl Default for LookupPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
            max_attempts: 3,
        }
    }
}

impl LookupPolicy {
    /// Wait before listing attempt `attempt` (0-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let capped_attempt = attempt.min(20); // Prevent 2^attempt from overflowing
        self.initial_delay
            .saturating_mul(1_u32 << capped_attempt)
            .min(self.max_delay)
    }
}
