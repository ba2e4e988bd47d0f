//! Websupport API 类型定义与记录编解码

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::{DnsRecordType, TxtRecord};

/// 记录列表分页响应
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordListResponse {
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[allow(dead_code)]
    #[serde(default)]
    pub total_records: u32,
    #[serde(default)]
    pub data: Vec<WebsupportRecord>,
}

/// Websupport DNS Record 结构（响应）
#[derive(Debug, Clone, Deserialize)]
pub struct WebsupportRecord {
    pub id: u64,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub ttl: u32,
}

impl WebsupportRecord {
    pub fn is_txt(&self) -> bool {
        self.record_type == DnsRecordType::Txt.as_str()
    }

    /// 转换为 `TxtRecord`，非 TXT 记录返回 `None`
    pub fn into_txt(self) -> Option<TxtRecord> {
        if !self.is_txt() {
            return None;
        }
        Some(TxtRecord {
            name: self.name,
            text: self.content,
            ttl: Duration::from_secs(u64::from(self.ttl)),
            provider_id: Some(self.id.to_string()),
        })
    }
}

/// 创建记录请求体
#[derive(Debug, Serialize)]
pub struct CreateRecordBody<'a> {
    #[serde(rename = "type")]
    pub record_type: &'static str,
    pub name: &'a str,
    pub content: &'a str,
    pub ttl: u32,
}

impl<'a> CreateRecordBody<'a> {
    /// TTL 以整秒发送，亚秒部分截断
    pub fn from_txt(record: &'a TxtRecord) -> Self {
        Self {
            record_type: DnsRecordType::Txt.as_str(),
            name: &record.name,
            content: &record.text,
            ttl: u32::try_from(record.ttl.as_secs()).unwrap_or(u32::MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_list_page() {
        let page: RecordListResponse = serde_json::from_str(
            r#"{
                "currentPage": 2,
                "totalPages": 3,
                "totalRecords": 250,
                "data": [
                    {"id": 101, "name": "_acme-challenge", "type": "TXT", "content": "token", "ttl": 120},
                    {"id": 102, "name": "www", "type": "A", "content": "192.0.2.1", "ttl": 600}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(page.current_page, 2);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.data.len(), 2);
        assert!(page.data[0].is_txt());
        assert!(!page.data[1].is_txt());
    }

    #[test]
    fn txt_record_decodes_to_model() {
        let wire = WebsupportRecord {
            id: 12_345,
            record_type: "TXT".into(),
            name: "_acme-challenge.example.com".into(),
            content: "token".into(),
            ttl: 300,
        };
        let txt = wire.into_txt().unwrap();
        assert_eq!(txt.name, "_acme-challenge.example.com");
        assert_eq!(txt.text, "token");
        assert_eq!(txt.ttl, Duration::from_secs(300));
        assert_eq!(txt.provider_id(), Some("12345"));
    }

    #[test]
    fn non_txt_record_is_dropped() {
        let wire = WebsupportRecord {
            id: 1,
            record_type: "CNAME".into(),
            name: "www".into(),
            content: "example.com".into(),
            ttl: 600,
        };
        assert!(wire.into_txt().is_none());
    }

    #[test]
    fn type_match_is_exact() {
        let wire = WebsupportRecord {
            id: 1,
            record_type: "txt".into(),
            name: "x".into(),
            content: "y".into(),
            ttl: 600,
        };
        assert!(!wire.is_txt());
    }

    #[test]
    fn create_body_truncates_ttl() {
        let txt = TxtRecord::new("_acme-challenge", "token").with_ttl(Duration::from_millis(120_900));
        let body = serde_json::to_value(CreateRecordBody::from_txt(&txt)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "type": "TXT",
                "name": "_acme-challenge",
                "content": "token",
                "ttl": 120
            })
        );
    }

    #[test]
    fn create_body_escapes_content() {
        let txt = TxtRecord::new("_acme-challenge", r#"v="1"; k=\x"#).with_ttl(Duration::from_secs(60));
        let json = serde_json::to_string(&CreateRecordBody::from_txt(&txt)).unwrap();
        let back: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back["content"], r#"v="1"; k=\x"#);
    }

    #[test]
    fn create_body_saturates_huge_ttl() {
        let txt = TxtRecord::new("a", "b").with_ttl(Duration::from_secs(u64::MAX));
        assert_eq!(CreateRecordBody::from_txt(&txt).ttl, u32::MAX);
    }
}
