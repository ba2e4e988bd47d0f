//! Websupport DNS Provider

mod http;
mod provider;
mod sign;
/// Websupport API-specific request/response types.
pub(crate) mod types;

use std::time::Duration;

use reqwest::Client;
use tokio_util::sync::CancellationToken;

use crate::config::{LookupPolicy, WebsupportConfig};
use crate::error::{ProviderError, Result};
use crate::providers::common::create_http_client;

/// Version prefix the API signs against but which the request path omits.
pub(crate) const SIGNATURE_PATH_PREFIX: &str = "/v2";
/// Websupport DNS Records API 单页记录数
pub(crate) const PAGE_SIZE: u32 = 100;

/// Websupport DNS provider implementation.
///
/// Authenticates every request with an HMAC-SHA1 signature over
/// `"{METHOD} {PATH} {TIMESTAMP}"`, sent as the Basic auth password.
///
/// Cloning is cheap and shares the HTTP connection pool.
///
/// # Construction
///
/// ```rust,no_run
/// use websupport_dns_provider::{WebsupportConfig, WebsupportProvider};
///
/// # fn main() -> websupport_dns_provider::Result<()> {
/// let provider = WebsupportProvider::new(WebsupportConfig::new(
///     "your-api-key",
///     "your-api-secret",
///     "1234567",
/// ))?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct WebsupportProvider {
    pub(crate) client: Client,
    pub(crate) api_key: String,
    pub(crate) api_secret: String,
    pub(crate) api_base: String,
    pub(crate) service_id: String,
    pub(crate) lookup: LookupPolicy,
    pub(crate) cancel: CancellationToken,
}

impl std::fmt::Debug for WebsupportProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebsupportProvider")
            .field("api_base", &self.api_base)
            .field("service_id", &self.service_id)
            .field("lookup", &self.lookup)
            .finish_non_exhaustive()
    }
}

/// Builder for [`WebsupportProvider`] with configurable transport,
/// identifier lookup and cancellation.
pub struct WebsupportProviderBuilder {
    config: WebsupportConfig,
    client: Option<Client>,
    timeout: Option<Duration>,
    lookup: LookupPolicy,
    cancel: CancellationToken,
}

impl WebsupportProviderBuilder {
    fn new(config: WebsupportConfig) -> Self {
        Self {
            timeout: config.timeout(),
            config,
            client: None,
            lookup: LookupPolicy::default(),
            cancel: CancellationToken::new(),
        }
    }

    /// Use a preconfigured HTTP client instead of the default one.
    ///
    /// The client's own timeouts apply; [`timeout`](Self::timeout) is ignored.
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Request timeout for the default HTTP client (default: 30s).
    ///
    /// Must be non-zero; [`build`](Self::build) rejects `Duration::ZERO`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Identifier lookup policy used after record creation.
    pub fn lookup_policy(mut self, lookup: LookupPolicy) -> Self {
        self.lookup = lookup;
        self
    }

    /// Token that aborts in-flight requests and lookup waits when cancelled.
    pub fn cancellation_token(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Validate the configuration and build the [`WebsupportProvider`].
    pub fn build(self) -> Result<WebsupportProvider> {
        self.config.validate()?;

        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(ProviderError::invalid_config(
                "timeout",
                "must be greater than zero",
            ));
        }

        let client = match self.client {
            Some(client) => client,
            None => create_http_client(self.timeout)?,
        };

        Ok(WebsupportProvider {
            client,
            api_key: self.config.api_key.trim().to_string(),
            api_secret: self.config.api_secret,
            api_base: self.config.api_base.trim_end_matches('/').to_string(),
            service_id: self.config.service_id.trim().to_string(),
            lookup: self.lookup,
            cancel: self.cancel,
        })
    }
}

impl WebsupportProvider {
    /// Creates a provider with default transport and lookup settings.
    pub fn new(config: WebsupportConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    /// Returns a builder for customizing the provider configuration.
    pub fn builder(config: WebsupportConfig) -> WebsupportProviderBuilder {
        WebsupportProviderBuilder::new(config)
    }

    /// A copy of this provider bound to another cancellation token.
    ///
    /// Useful for scoping a single call to a caller-owned deadline.
    #[must_use]
    pub fn with_cancellation(&self, cancel: CancellationToken) -> Self {
        Self {
            cancel,
            ..self.clone()
        }
    }

    /// The cancellation token this provider observes.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }
}
