use serde::{Deserialize, Serialize};

use crate::utils::log_sanitizer::truncate_for_log;

/// Error type for all Websupport DNS operations.
///
/// All variants are serializable for structured error reporting.
///
/// # Retries
///
/// Nothing in this crate retries a failed HTTP call. Transport failures
/// ([`NetworkError`](Self::NetworkError), [`Timeout`](Self::Timeout),
/// [`Cancelled`](Self::Cancelled)) and unexpected statuses
/// ([`RemoteError`](Self::RemoteError)) are surfaced to the caller immediately.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// The provider configuration is incomplete or malformed.
    ///
    /// Raised before any request is sent. Never retryable.
    InvalidConfig {
        /// Configuration field at fault (e.g. `service_id`).
        field: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Error details.
        detail: String,
    },

    /// The operation was cancelled through the provider's cancellation token.
    Cancelled {
        /// What was in flight when the cancellation arrived.
        detail: String,
    },

    /// The API answered with a status other than the one the operation expects.
    RemoteError {
        /// HTTP status code.
        status: u16,
        /// Raw response body, kept for diagnostics.
        body: String,
    },

    /// Failed to parse the API response.
    ParseError {
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    SerializationError {
        /// Details about the serialization failure.
        detail: String,
    },
}

impl ProviderError {
    /// 是否为预期行为（配置错误、调用方取消），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. } | Self::Cancelled { .. })
    }

    /// Whether the error was caused by cancellation.
    ///
    /// The reconciler swallows most lookup failures, but never this one.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }

    pub(crate) fn invalid_config(field: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            detail: detail.into(),
        }
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig { field, detail } => {
                write!(f, "[websupport] Invalid configuration '{field}': {detail}")
            }
            Self::NetworkError { detail } => {
                write!(f, "[websupport] Network error: {detail}")
            }
            Self::Timeout { detail } => {
                write!(f, "[websupport] Request timeout: {detail}")
            }
            Self::Cancelled { detail } => {
                write!(f, "[websupport] Cancelled: {detail}")
            }
            Self::RemoteError { status, body } => {
                if body.is_empty() {
                    write!(f, "[websupport] Unexpected HTTP status {status}")
                } else {
                    write!(
                        f,
                        "[websupport] Unexpected HTTP status {status}, body: {}",
                        truncate_for_log(body)
                    )
                }
            }
            Self::ParseError { detail } => {
                write!(f, "[websupport] Parse error: {detail}")
            }
            Self::SerializationError { detail } => {
                write!(f, "[websupport] Serialization error: {detail}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
