//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;
use std::time::Duration;

use serde_json::{Value, json};
use websupport_dns_provider::{LookupPolicy, WebsupportConfig, WebsupportProvider};
use wiremock::MockServer;

/// Service id used against the mock server.
pub const SERVICE_ID: &str = "42";
/// Zone used against the mock server.
pub const ZONE: &str = "example.com";
/// Path of the record collection for [`SERVICE_ID`].
pub const RECORDS_PATH: &str = "/service/42/dns/record";

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Option` 为 `Some`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 生成唯一的测试记录名称
pub fn generate_test_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

// ============ Mock server ============

/// Lookup policy that never sleeps, with a single listing attempt.
pub fn instant_lookup() -> LookupPolicy {
    LookupPolicy {
        initial_delay: Duration::ZERO,
        max_delay: Duration::ZERO,
        max_attempts: 1,
    }
}

/// Provider pointed at the mock server.
pub fn mock_provider(server: &MockServer) -> WebsupportProvider {
    let config = WebsupportConfig::new("test-key", "test-secret", SERVICE_ID)
        .with_api_base(server.uri());
    WebsupportProvider::builder(config)
        .lookup_policy(instant_lookup())
        .build()
        .expect("mock provider config should be valid")
}

/// One wire record as returned by the list endpoint.
pub fn wire_record(id: u64, record_type: &str, name: &str, content: &str) -> Value {
    json!({
        "id": id,
        "type": record_type,
        "name": name,
        "content": content,
        "ttl": 600
    })
}

/// A list-endpoint page body.
pub fn list_page(current_page: u32, total_pages: u32, data: Vec<Value>) -> Value {
    json!({
        "currentPage": current_page,
        "totalPages": total_pages,
        "totalRecords": data.len(),
        "data": data
    })
}

// ============ Live API ============

/// 真实 API 测试上下文
pub struct TestContext {
    pub provider: WebsupportProvider,
    pub zone: String,
}

impl TestContext {
    /// 从环境变量创建测试上下文
    pub fn from_env() -> Option<Self> {
        let config = WebsupportConfig::from_env().ok()?;
        let zone = env::var("WEBSUPPORT_TEST_ZONE").ok()?;
        let provider = WebsupportProvider::new(config).ok()?;
        Some(Self { provider, zone })
    }
}

