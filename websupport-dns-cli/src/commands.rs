//! Subcommand implementations

use std::time::Duration;

use anyhow::{Context, bail};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use websupport_dns_provider::{
    CancellationToken, DnsRecordManager, Record, TxtRecord, WebsupportProvider,
};

use crate::doh;

const TEST_RECORD_NAME: &str = "_websupport-test";
const CHALLENGE_RECORD_NAME: &str = "_acme-challenge";
const CHALLENGE_PREFIX: &str = "test-acme-challenge-value-";
const RECORD_TTL: Duration = Duration::from_secs(120);

/// 基础操作：创建 → 列表 → 删除
pub async fn basic_operations(provider: &WebsupportProvider, zone: &str) -> anyhow::Result<()> {
    tracing::info!("Testing DNS record operations on {zone}");

    // 1. 创建
    let record = TxtRecord::new(
        TEST_RECORD_NAME,
        format!("test-value-{}", Utc::now().timestamp()),
    )
    .with_ttl(RECORD_TTL);
    let created = provider
        .append_records(zone, &[record.into()])
        .await
        .context("failed to create record")?;
    for record in created.iter().filter_map(Record::as_txt) {
        tracing::info!(
            "Created {} = {} (id {})",
            record.name,
            record.text,
            record.provider_id().unwrap_or("unresolved")
        );
    }

    // 2. 列表
    let records = provider
        .get_records(zone)
        .await
        .context("failed to list records")?;
    tracing::info!("Found {} TXT records", records.len());
    print_records(&records);

    // 3. 删除
    let deleted = provider
        .delete_records(zone, &created)
        .await
        .context("failed to delete record")?;
    tracing::info!("Deleted {} records", deleted.len());

    if deleted.len() != created.len() {
        bail!(
            "created {} records but deleted {}",
            created.len(),
            deleted.len()
        );
    }

    tracing::info!("All operations succeeded");
    Ok(())
}

/// 模拟 ACME DNS-01 挑战（不会申请真实证书）
pub async fn acme_challenge(
    provider: &WebsupportProvider,
    zone: &str,
    domain: &str,
    propagation_wait: Duration,
) -> anyhow::Result<()> {
    tracing::info!("Simulating ACME DNS-01 challenge for {domain}");

    let challenge_value = URL_SAFE_NO_PAD.encode(format!(
        "{CHALLENGE_PREFIX}{}",
        Utc::now().timestamp()
    ));
    run_challenge(provider, zone, domain, &challenge_value, propagation_wait).await
}

/// 创建挑战记录并校验，无论校验结果如何都会清理
async fn run_challenge(
    provider: &WebsupportProvider,
    zone: &str,
    domain: &str,
    challenge_value: &str,
    propagation_wait: Duration,
) -> anyhow::Result<()> {
    // 1. 创建挑战记录
    let challenge = TxtRecord::new(CHALLENGE_RECORD_NAME, challenge_value).with_ttl(RECORD_TTL);
    let created = provider
        .append_records(zone, &[challenge.into()])
        .await
        .context("failed to create challenge record")?;
    let id = created
        .first()
        .and_then(Record::as_txt)
        .and_then(TxtRecord::provider_id)
        .unwrap_or("unresolved");
    tracing::info!("Created challenge record (id {id})");

    let verified =
        verify_challenge(provider, zone, domain, challenge_value, propagation_wait).await;

    // 5. 清理：使用新的 token，中断后仍可删除
    let cleanup = provider
        .with_cancellation(CancellationToken::new())
        .delete_records(zone, &created)
        .await
        .context("failed to delete challenge record");
    match cleanup {
        Ok(deleted) => tracing::info!("Deleted {} records", deleted.len()),
        Err(e) if verified.is_ok() => return Err(e),
        Err(e) => tracing::error!("{e:#}"),
    }

    verified?;
    tracing::info!("ACME DNS-01 simulation completed");
    Ok(())
}

async fn verify_challenge(
    provider: &WebsupportProvider,
    zone: &str,
    domain: &str,
    challenge_value: &str,
    propagation_wait: Duration,
) -> anyhow::Result<()> {
    // 2. 等待传播（可中断）
    tracing::info!(
        "Waiting {}s for DNS propagation",
        propagation_wait.as_secs()
    );
    tokio::select! {
        () = provider.cancellation_token().cancelled() => bail!("interrupted"),
        () = tokio::time::sleep(propagation_wait) => {}
    }

    // 3. 公共 DNS 查询
    let fqdn = format!("{CHALLENGE_RECORD_NAME}.{domain}");
    if doh::txt_visible(&fqdn, challenge_value).await {
        tracing::info!("{fqdn} is publicly visible");
    } else {
        tracing::warn!("{fqdn} not yet publicly visible (normal right after a change)");
    }

    // 4. API 中确认
    let records = provider
        .get_records(zone)
        .await
        .context("failed to list records")?;
    let found = records
        .iter()
        .filter_map(Record::as_txt)
        .any(|r| r.text == challenge_value);
    if found {
        tracing::info!("Challenge record present in API listing");
    } else {
        tracing::warn!("Challenge record not found in API listing");
    }
    Ok(())
}

/// 列出 TXT 记录
pub async fn list(provider: &WebsupportProvider, zone: &str, json: bool) -> anyhow::Result<()> {
    let records = provider
        .get_records(zone)
        .await
        .context("failed to list records")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        print_records(&records);
    }
    Ok(())
}

fn print_records(records: &[Record]) {
    for record in records.iter().filter_map(Record::as_txt) {
        println!(
            "{}\t{}\t{}\t{}",
            record.provider_id().unwrap_or("-"),
            record.name,
            record.ttl.as_secs(),
            record.text
        );
    }
}
