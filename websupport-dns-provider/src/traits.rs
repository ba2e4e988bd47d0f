use async_trait::async_trait;

use crate::error::Result;
use crate::types::Record;

/// DNS record management interface consumed by ACME DNS-01 solvers.
///
/// Records of kinds a provider does not manage are skipped silently and do
/// not appear in the returned sets.
#[async_trait]
pub trait DnsRecordManager: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// 获取区域内的全部记录
    ///
    /// Always re-fetches the authoritative list; nothing is cached.
    async fn get_records(&self, zone: &str) -> Result<Vec<Record>>;

    /// 创建记录
    ///
    /// Returns the created records, with provider identifiers filled in
    /// where they could be resolved. The first hard failure aborts the batch;
    /// records created before it are not rolled back.
    async fn append_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>>;

    /// 删除记录
    ///
    /// Returns the records that were actually deleted. Records whose
    /// identifier cannot be resolved are left out of the result rather than
    /// reported as errors.
    async fn delete_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>>;
}
