//! Websupport 真实 API 集成测试
//!
//! 运行方式:
//! ```bash
//! WEBSUPPORT_API_KEY=xxx WEBSUPPORT_API_SECRET=xxx WEBSUPPORT_SERVICE_ID=123 \
//! WEBSUPPORT_TEST_ZONE=example.com \
//!     cargo test -p websupport-dns-provider --test live_test -- --ignored --nocapture --test-threads=1
//! ```

mod common;

use common::{TestContext, generate_test_record_name};
use websupport_dns_provider::{DnsRecordManager, Record, TxtRecord};

#[tokio::test]
#[ignore]
async fn test_websupport_list_records() {
    skip_if_no_credentials!(
        "WEBSUPPORT_API_KEY",
        "WEBSUPPORT_API_SECRET",
        "WEBSUPPORT_SERVICE_ID",
        "WEBSUPPORT_TEST_ZONE"
    );

    let ctx = require_some!(TestContext::from_env(), "创建测试上下文失败");
    let records = require_ok!(ctx.provider.get_records(&ctx.zone).await, "get_records 调用失败");

    for record in &records {
        assert!(record.as_txt().is_some(), "列表只应包含 TXT 记录");
    }

    println!("✓ get_records 测试通过，共 {} 条 TXT 记录", records.len());
}

#[tokio::test]
#[ignore]
async fn test_websupport_txt_lifecycle() {
    skip_if_no_credentials!(
        "WEBSUPPORT_API_KEY",
        "WEBSUPPORT_API_SECRET",
        "WEBSUPPORT_SERVICE_ID",
        "WEBSUPPORT_TEST_ZONE"
    );

    let ctx = require_some!(TestContext::from_env(), "创建测试上下文失败");
    let name = generate_test_record_name();
    let text = format!("lifecycle-{}", uuid::Uuid::new_v4());

    // 1. 创建
    let created = require_ok!(
        ctx.provider
            .append_records(&ctx.zone, &[Record::from(TxtRecord::new(&name, &text))])
            .await,
        "append_records 调用失败"
    );
    assert_eq!(created.len(), 1);
    let record = require_some!(created[0].as_txt());
    println!("创建记录: {} (id {:?})", record.name, record.provider_id());

    // 2. 列表中可见
    let listed = require_ok!(ctx.provider.get_records(&ctx.zone).await);
    assert!(
        listed
            .iter()
            .filter_map(Record::as_txt)
            .any(|r| r.text == text),
        "新记录应出现在列表中"
    );

    // 3. 删除（按名称和内容重新匹配，不依赖 ID）
    let deleted = require_ok!(
        ctx.provider
            .delete_records(&ctx.zone, &[Record::from(TxtRecord::new(&name, &text))])
            .await,
        "delete_records 调用失败"
    );
    assert_eq!(deleted.len(), 1, "应删除一条记录");

    // 4. 再次删除为空操作
    let again = require_ok!(
        ctx.provider
            .delete_records(&ctx.zone, &[Record::from(TxtRecord::new(&name, &text))])
            .await
    );
    assert!(again.is_empty());

    println!("✓ TXT 生命周期测试通过");
}
