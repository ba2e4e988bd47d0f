//! Generic HTTP client tools
//!
//! Sends a prepared `RequestBuilder`, logs the exchange and reads the body,
//! racing everything against a cancellation token. Signing stays with the
//! provider, which builds the `RequestBuilder` itself.
//!
//! Nothing here retries: every failure is returned to the caller as is.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::error::ProviderError;
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns status code and response text
    ///
    /// # Arguments
    /// * `request_builder` - configured request constructor (URL, headers, body)
    /// * `method_name` - request method name (for logging)
    /// * `url` - request URL (for logging)
    /// * `cancel` - aborts the request as soon as it fires
    ///
    /// # Returns
    /// * `Ok((status_code, response_text))` - any status, including non-2xx
    /// * `Err(ProviderError::Cancelled)` - the token fired first
    /// * `Err(ProviderError::Timeout | ProviderError::NetworkError)` - transport failure
    pub async fn execute_request(
        request_builder: RequestBuilder,
        method_name: &str,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<(u16, String), ProviderError> {
        log::debug!("[websupport] {method_name} {url}");

        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                log::warn!("[websupport] {method_name} {url} cancelled");
                Err(ProviderError::Cancelled {
                    detail: format!("{method_name} {url}"),
                })
            }
            result = Self::send(request_builder) => result,
        }
    }

    async fn send(request_builder: RequestBuilder) -> Result<(u16, String), ProviderError> {
        let response = request_builder.send().await.map_err(transport_error)?;

        let status_code = response.status().as_u16();
        log::debug!("[websupport] Response Status: {status_code}");

        let response_text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                transport_error(e)
            } else {
                ProviderError::NetworkError {
                    detail: format!("Failed to read response body: {e}"),
                }
            }
        })?;

        log::debug!(
            "[websupport] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Parse JSON response
    ///
    /// # Returns
    /// * `Ok(T)` - successfully parsed
    /// * `Err(ProviderError::ParseError)` - parsing failed
    pub fn parse_json<T>(response_text: &str) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[websupport] JSON parse failed: {e}");
            log::error!(
                "[websupport] Raw response: {}",
                truncate_for_log(response_text)
            );
            ProviderError::ParseError {
                detail: e.to_string(),
            }
        })
    }

    /// Require an exact status code, turning anything else into `RemoteError`.
    pub fn expect_status(
        status: u16,
        expected: u16,
        response_text: &str,
    ) -> Result<(), ProviderError> {
        if status == expected {
            Ok(())
        } else {
            log::warn!(
                "[websupport] Expected HTTP {expected}, got {status}: {}",
                truncate_for_log(response_text)
            );
            Err(ProviderError::RemoteError {
                status,
                body: response_text.to_string(),
            })
        }
    }
}

/// Classify a reqwest failure as timeout or network error
fn transport_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout {
            detail: e.to_string(),
        }
    } else {
        ProviderError::NetworkError {
            detail: e.to_string(),
        }
    }
}
