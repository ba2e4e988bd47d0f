//! Websupport HTTP 请求方法

use chrono::Utc;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder};

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;

use super::sign::format_x_date;
use super::types::{CreateRecordBody, RecordListResponse};
use super::{PAGE_SIZE, SIGNATURE_PATH_PREFIX, WebsupportProvider};

impl WebsupportProvider {
    // ==================== 辅助方法 ====================

    /// 记录集合路径（不含版本前缀）
    fn records_path(&self) -> String {
        format!("/service/{}/dns/record", urlencoding::encode(&self.service_id))
    }

    /// 构建已签名请求
    ///
    /// The literal URL is `api_base + path (+ query)`; the signature covers
    /// `/v2 + path` without the query string.
    fn signed_request(
        &self,
        method: Method,
        path: &str,
        query: Option<&str>,
    ) -> (RequestBuilder, String) {
        let timestamp = Utc::now().timestamp();
        let signed_path = format!("{SIGNATURE_PATH_PREFIX}{path}");
        let signature = self.sign(method.as_str(), &signed_path, timestamp);

        let url = match query {
            Some(query) => format!("{}{path}?{query}", self.api_base),
            None => format!("{}{path}", self.api_base),
        };

        let request = self
            .client
            .request(method, &url)
            .basic_auth(&self.api_key, Some(signature))
            .header("X-Date", format_x_date(timestamp))
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");

        (request, url)
    }

    // ==================== API 方法 ====================

    /// 获取一页记录（200 以外的状态均视为失败）
    pub(crate) async fn list_page(&self, page: u32) -> Result<RecordListResponse> {
        let query = format!("page={page}&rowsPerPage={PAGE_SIZE}");
        let (request, url) = self.signed_request(Method::GET, &self.records_path(), Some(&query));

        let (status, response_text) =
            HttpUtils::execute_request(request, "GET", &url, &self.cancel).await?;

        HttpUtils::expect_status(status, 200, &response_text)?;
        HttpUtils::parse_json(&response_text)
    }

    /// 创建记录（成功仅为 204，无响应体）
    pub(crate) async fn create(&self, body: &CreateRecordBody<'_>) -> Result<()> {
        let payload =
            serde_json::to_string(body).map_err(|e| ProviderError::SerializationError {
                detail: e.to_string(),
            })?;

        log::debug!("[websupport] Request Body: {payload}");

        let (request, url) = self.signed_request(Method::POST, &self.records_path(), None);
        let (status, response_text) =
            HttpUtils::execute_request(request.body(payload), "POST", &url, &self.cancel).await?;

        HttpUtils::expect_status(status, 204, &response_text)
    }

    /// 按 ID 删除记录（成功仅为 204）
    pub(crate) async fn delete(&self, record_id: &str) -> Result<()> {
        let path = format!("{}/{}", self.records_path(), urlencoding::encode(record_id));
        let (request, url) = self.signed_request(Method::DELETE, &path, None);

        let (status, response_text) =
            HttpUtils::execute_request(request, "DELETE", &url, &self.cancel).await?;

        HttpUtils::expect_status(status, 204, &response_text)
    }
}
