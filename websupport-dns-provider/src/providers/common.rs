//! Provider 公共工具函数

use std::time::Duration;

use hmac::{Hmac, Mac};
use reqwest::Client;
use sha1::Sha1;

use crate::error::{ProviderError, Result};
use crate::types::TxtRecord;

type HmacSha1 = Hmac<Sha1>;

// ============ HTTP Client ============

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// 创建带超时配置的 HTTP Client
pub fn create_http_client(timeout: Option<Duration>) -> Result<Client> {
    let timeout = timeout.unwrap_or(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS).min(timeout))
        .timeout(timeout)
        .build()
        .map_err(|e| ProviderError::invalid_config("http_client", e.to_string()))
}

// ============ HMAC-SHA1 ============

/// HMAC-SHA1 计算
pub fn hmac_sha1(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = <HmacSha1 as Mac>::new_from_slice(key)
        .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length"));
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

// ============ 域名名称处理 ============

/// 将记录名称规范化为相对名称（用于记录匹配）
///
/// 去掉末尾一个点，再去掉一个 `.` + zone 后缀（zone 同样去掉末尾一个点）。
/// 如: "_acme-challenge.example.com." + "example.com" -> "_acme-challenge"
/// 如: "example.com." + "example.com." -> "@"
/// 如: "" + "example.com" -> "@"
///
/// Case-sensitive.
pub fn relative_name(name: &str, zone: &str) -> String {
    let name = name.strip_suffix('.').unwrap_or(name);
    let zone = zone.strip_suffix('.').unwrap_or(zone);

    if name.is_empty() || name == "@" || (!zone.is_empty() && name == zone) {
        "@".to_string()
    } else if zone.is_empty() {
        name.to_string()
    } else if let Some(subdomain) = name.strip_suffix(&format!(".{zone}")) {
        subdomain.to_string()
    } else {
        name.to_string()
    }
}

/// 判断远端记录是否与本地记录相同（规范化名称 + 精确文本）
pub fn same_txt_record(remote: &TxtRecord, local: &TxtRecord, zone: &str) -> bool {
    remote.text == local.text && relative_name(&remote.name, zone) == relative_name(&local.name, zone)
}
