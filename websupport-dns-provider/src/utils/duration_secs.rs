//! TTL 序列化/反序列化工具
//!
//! - 序列化: `Duration` -> 整数秒（亚秒部分截断）
//! - 反序列化: 整数秒 或 数字字符串 -> `Duration`

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serializer};

/// 序列化 `Duration` 为整数秒
pub fn serialize<S>(ttl: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u64(ttl.as_secs())
}

/// 反序列化：支持整数秒或数字字符串
pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Seconds {
        U64(u64),
        String(String),
    }

    match Seconds::deserialize(deserializer)? {
        Seconds::U64(secs) => Ok(Duration::from_secs(secs)),
        Seconds::String(s) => s
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| Error::custom(format!("Invalid TTL seconds '{s}': {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Holder {
        #[serde(with = "super")]
        ttl: Duration,
    }

    #[test]
    fn serializes_whole_seconds() {
        let h = Holder {
            ttl: Duration::from_millis(1_999),
        };
        assert_eq!(serde_json::to_string(&h).unwrap(), r#"{"ttl":1}"#);
    }

    #[test]
    fn deserializes_number_and_string() {
        let a: Holder = serde_json::from_str(r#"{"ttl":600}"#).unwrap();
        let b: Holder = serde_json::from_str(r#"{"ttl":"600"}"#).unwrap();
        assert_eq!(a.ttl, Duration::from_secs(600));
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_garbage() {
        let r: Result<Holder, _> = serde_json::from_str(r#"{"ttl":"soon"}"#);
        assert!(r.is_err());
    }
}
