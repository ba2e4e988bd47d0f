//! # websupport-dns-provider
//!
//! TXT record management for the [Websupport](https://www.websupport.sk/) REST
//! API, shaped for ACME DNS-01 challenge solvers.
//!
//! The API returns no body when a record is created, so identifiers are
//! recovered by listing and matching (normalized name + exact text). Records
//! of any kind other than TXT pass through the interface untouched.
//!
//! ## Feature Flags
//!
//! ### TLS Backend
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls. Recommended for cross-compilation and static builds.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! websupport-dns-provider = "0.1"
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use websupport_dns_provider::{
//!     DnsRecordManager, Record, TxtRecord, WebsupportConfig, WebsupportProvider,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Read WEBSUPPORT_API_KEY / WEBSUPPORT_API_SECRET / WEBSUPPORT_SERVICE_ID
//!     let provider = WebsupportProvider::new(WebsupportConfig::from_env()?)?;
//!
//!     // 2. Publish a challenge token
//!     let challenge = Record::from(TxtRecord::new("_acme-challenge", "token-value"));
//!     let created = provider.append_records("example.com", &[challenge]).await?;
//!
//!     // 3. ... let the CA validate ...
//!
//!     // 4. Remove it again (uses the resolved id when there is one)
//!     provider.delete_records("example.com", &created).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Cancellation
//!
//! Every request and every wait is raced against a
//! [`CancellationToken`]. Bind one at construction with
//! [`WebsupportProviderBuilder::cancellation_token`], or scope a single call
//! with [`WebsupportProvider::with_cancellation`]:
//!
//! ```rust,no_run
//! # use websupport_dns_provider::*;
//! # async fn example(provider: WebsupportProvider) -> Result<()> {
//! let token = CancellationToken::new();
//! let scoped = provider.with_cancellation(token.clone());
//! let records = scoped.get_records("example.com").await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError):
//!
//! - [`ProviderError::InvalidConfig`]: missing or malformed configuration
//! - [`ProviderError::RemoteError`]: unexpected HTTP status, with the response body
//! - [`ProviderError::NetworkError`] / [`ProviderError::Timeout`]: transport failure
//! - [`ProviderError::Cancelled`]: the cancellation token fired
//! - [`ProviderError::ParseError`]: malformed response body
//!
//! Nothing is retried automatically. A created record whose identifier cannot
//! be resolved is returned without one rather than as an error.

mod config;
mod error;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export configuration
pub use config::{DEFAULT_API_BASE, LookupPolicy, WebsupportConfig, env};

// Re-export core trait
pub use traits::DnsRecordManager;

// Re-export types
pub use types::{DEFAULT_TTL, DnsRecordType, OtherRecord, Record, TxtRecord};

// Re-export the concrete provider
pub use providers::{WebsupportProvider, WebsupportProviderBuilder};

pub use tokio_util::sync::CancellationToken;
