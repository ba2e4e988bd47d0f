//! Websupport DnsRecordManager trait 实现

use std::collections::HashSet;

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::providers::common::same_txt_record;
use crate::traits::DnsRecordManager;
use crate::types::{DEFAULT_TTL, Record, TxtRecord};

use super::WebsupportProvider;
use super::types::CreateRecordBody;

impl WebsupportProvider {
    /// 拉取服务下全部 TXT 记录（逐页，直到最后一页）
    pub(crate) async fn list_txt_records(&self) -> Result<Vec<TxtRecord>> {
        let mut records = Vec::new();
        let mut page = 1_u32;

        loop {
            let response = self.list_page(page).await?;
            let current_page = response.current_page.max(page);
            let total_pages = response.total_pages;

            records.extend(response.data.into_iter().filter_map(|r| r.into_txt()));

            if current_page >= total_pages {
                break;
            }
            page = current_page + 1;
        }

        log::debug!("[websupport] Listed {} TXT records", records.len());
        Ok(records)
    }

    /// 在列表中查找与 `local` 匹配的第一条记录 ID
    fn find_record_id(remote: &[TxtRecord], local: &TxtRecord, zone: &str) -> Option<String> {
        remote
            .iter()
            .find(|r| same_txt_record(r, local, zone))
            .and_then(|r| r.provider_id().map(str::to_string))
    }

    /// 创建后按退避策略查找新记录 ID
    ///
    /// A miss (including a failed listing) is not an error: the record exists
    /// remotely, it just comes back without an identifier. Only cancellation
    /// propagates.
    async fn resolve_created_id(&self, record: &TxtRecord, zone: &str) -> Result<Option<String>> {
        for attempt in 0..self.lookup.max_attempts {
            let delay = self.lookup.delay_for(attempt);
            if !delay.is_zero() {
                tokio::select! {
                    biased;
                    () = self.cancel.cancelled() => {
                        return Err(ProviderError::Cancelled {
                            detail: format!("identifier lookup for {}", record.name),
                        });
                    }
                    () = tokio::time::sleep(delay) => {}
                }
            }

            match self.list_txt_records().await {
                Ok(remote) => {
                    if let Some(id) = Self::find_record_id(&remote, record, zone) {
                        return Ok(Some(id));
                    }
                    log::debug!(
                        "[websupport] Record {} not listed yet (attempt {}/{})",
                        record.name,
                        attempt + 1,
                        self.lookup.max_attempts
                    );
                }
                Err(e) if e.is_cancelled() => return Err(e),
                Err(e) => {
                    log::warn!(
                        "[websupport] Listing after create failed (attempt {}/{}): {e}",
                        attempt + 1,
                        self.lookup.max_attempts
                    );
                }
            }
        }

        log::warn!(
            "[websupport] Created record {} but could not resolve its id",
            record.name
        );
        Ok(None)
    }

    async fn append_txt(&self, record: &TxtRecord, zone: &str) -> Result<TxtRecord> {
        let mut record = record.clone();
        // 亚秒 TTL 在线上会截断为 0，同样使用默认值
        if record.ttl.as_secs() == 0 {
            record.ttl = DEFAULT_TTL;
        }

        self.create(&CreateRecordBody::from_txt(&record)).await?;
        log::info!("[websupport] Created TXT record {}", record.name);

        record.provider_id = self.resolve_created_id(&record, zone).await?;
        Ok(record)
    }
}

#[async_trait]
impl DnsRecordManager for WebsupportProvider {
    fn id(&self) -> &'static str {
        "websupport"
    }

    async fn get_records(&self, _zone: &str) -> Result<Vec<Record>> {
        let records = self.list_txt_records().await?;
        Ok(records.into_iter().map(Record::Txt).collect())
    }

    async fn append_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>> {
        let mut created = Vec::with_capacity(records.len());

        for record in records {
            match record {
                Record::Txt(txt) => {
                    created.push(Record::Txt(self.append_txt(txt, zone).await?));
                }
                Record::Other(other) => {
                    log::debug!(
                        "[websupport] Skipping {} record {}",
                        other.record_type,
                        other.name
                    );
                }
            }
        }

        Ok(created)
    }

    async fn delete_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>> {
        // 无 ID 的记录共用一次列表查询；列表失败视为无匹配
        let mut listing: Option<Vec<TxtRecord>> = None;
        let mut deleted_ids: HashSet<String> = HashSet::new();
        let mut deleted = Vec::new();

        for record in records {
            let Record::Txt(txt) = record else {
                continue;
            };

            let id = match txt.provider_id() {
                Some(id) => id.to_string(),
                None => {
                    if listing.is_none() {
                        listing = Some(match self.list_txt_records().await {
                            Ok(remote) => remote,
                            Err(e) if e.is_cancelled() => return Err(e),
                            Err(e) => {
                                log::warn!("[websupport] Cannot list records for delete: {e}");
                                Vec::new()
                            }
                        });
                    }
                    let remote = listing.as_deref().unwrap_or_default();
                    match Self::find_record_id(remote, txt, zone) {
                        Some(id) => id,
                        None => {
                            log::debug!("[websupport] No remote match for {}, skipping", txt.name);
                            continue;
                        }
                    }
                }
            };

            if deleted_ids.contains(&id) {
                log::debug!("[websupport] Record {id} already deleted in this batch, skipping");
                continue;
            }

            self.delete(&id).await?;
            log::info!("[websupport] Deleted TXT record {} (id {id})", txt.name);

            // 已删除的记录不再参与后续匹配
            if let Some(remote) = listing.as_mut() {
                remote.retain(|r| r.provider_id() != Some(id.as_str()));
            }
            deleted_ids.insert(id.clone());
            deleted.push(Record::Txt(txt.clone().with_provider_id(id)));
        }

        Ok(deleted)
    }
}
