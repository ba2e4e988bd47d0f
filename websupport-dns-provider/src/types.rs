use std::time::Duration;

use serde::{Deserialize, Serialize};

/// TTL applied to appended records that carry a zero TTL.
pub const DEFAULT_TTL: Duration = Duration::from_secs(120);

// ============ DNS Record Types ============

/// DNS record type identifier.
///
/// Serialized as uppercase strings (`"A"`, `"AAAA"`, `"CNAME"`, etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DnsRecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name (alias) record.
    Cname,
    /// Mail exchange record.
    Mx,
    /// Text record.
    Txt,
    /// Name server record.
    Ns,
    /// Service locator record.
    Srv,
    /// Certificate Authority Authorization record.
    Caa,
}

impl DnsRecordType {
    /// Uppercase wire name of the type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Ns => "NS",
            Self::Srv => "SRV",
            Self::Caa => "CAA",
        }
    }
}

impl std::fmt::Display for DnsRecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============ Records ============

/// A TXT record, the only kind this crate creates and deletes.
///
/// `name` may be zone-relative (`"_acme-challenge"`) or absolute
/// (`"_acme-challenge.example.com."`). `provider_id` is the decimal form of the
/// server-assigned numeric id and is only present once the record is known to
/// exist server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxtRecord {
    /// Record name.
    pub name: String,
    /// Text payload.
    pub text: String,
    /// Time to live. Sub-second precision is dropped on the wire.
    #[serde(with = "crate::utils::duration_secs")]
    pub ttl: Duration,
    /// Provider-assigned identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
}

impl TxtRecord {
    /// Create a record with a zero TTL (defaulted on append) and no identifier.
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            ttl: Duration::ZERO,
            provider_id: None,
        }
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    #[must_use]
    pub fn with_provider_id(mut self, id: impl Into<String>) -> Self {
        self.provider_id = Some(id.into());
        self
    }

    /// The provider identifier, treating an empty string as absent.
    pub fn provider_id(&self) -> Option<&str> {
        self.provider_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Any record kind other than TXT.
///
/// Carried through the interface so callers can pass mixed record sets;
/// the provider never acts on these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherRecord {
    /// Record type.
    pub record_type: DnsRecordType,
    /// Record name.
    pub name: String,
    /// Primary value (address, target, ...).
    pub value: String,
    /// Time to live.
    #[serde(with = "crate::utils::duration_secs")]
    pub ttl: Duration,
}

/// A DNS record passed through the [`DnsRecordManager`](crate::DnsRecordManager) interface.
///
/// Serialized as a tagged enum with `"kind"` as the tag:
///
/// ```json
/// { "kind": "txt", "name": "_acme-challenge", "text": "token", "ttl": 120 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Record {
    /// TXT record.
    Txt(TxtRecord),
    /// Any other record kind.
    Other(OtherRecord),
}

impl Record {
    /// Returns the [`DnsRecordType`] discriminant for this record.
    pub fn record_type(&self) -> DnsRecordType {
        match self {
            Self::Txt(_) => DnsRecordType::Txt,
            Self::Other(other) => other.record_type,
        }
    }

    /// Record name as given.
    pub fn name(&self) -> &str {
        match self {
            Self::Txt(txt) => &txt.name,
            Self::Other(other) => &other.name,
        }
    }

    /// Returns the TXT payload if this is a TXT record.
    pub fn as_txt(&self) -> Option<&TxtRecord> {
        match self {
            Self::Txt(txt) => Some(txt),
            Self::Other(_) => None,
        }
    }
}

impl From<TxtRecord> for Record {
    fn from(txt: TxtRecord) -> Self {
        Self::Txt(txt)
    }
}

impl From<OtherRecord> for Record {
    fn from(other: OtherRecord) -> Self {
        Self::Other(other)
    }
}
