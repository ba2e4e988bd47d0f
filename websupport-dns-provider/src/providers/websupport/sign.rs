//! Websupport HMAC-SHA1 签名

use chrono::DateTime;

use crate::providers::common::hmac_sha1;

use super::WebsupportProvider;

/// `X-Date` header format (UTC).
pub(crate) const X_DATE_FORMAT: &str = "%Y%m%dT%H%M%SZ";

impl WebsupportProvider {
    /// 生成请求签名
    ///
    /// `path` is the signed path, which includes the `/v2` prefix and never
    /// the query string.
    pub(crate) fn sign(&self, method: &str, path: &str, timestamp: i64) -> String {
        let canonical_request = format!("{method} {path} {timestamp}");
        hex::encode(hmac_sha1(
            self.api_secret.as_bytes(),
            canonical_request.as_bytes(),
        ))
    }
}

/// Format a Unix timestamp as the `X-Date` header value.
pub(crate) fn format_x_date(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format(X_DATE_FORMAT).to_string())
        .unwrap_or_default()
}
