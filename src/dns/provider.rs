use std::fmt;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A DNS record as held by the registrar.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DnsRecord {
    /// Registrar-assigned identifier
    pub id: u64,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub data: String,
    pub ttl: u32,
}

impl fmt::Display for DnsRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DomainRecord{{ID:{}, Type:{:?}, Name:{:?}, Data:{:?}, TTL:{}}}",
            self.id, self.record_type, self.name, self.data, self.ttl
        )
    }
}

/// New values for an existing record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordEdit {
    pub data: String,
    pub ttl: u32,
}

#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// List records of `record_type` in `zone` whose fully-qualified name is `name`
    async fn list_records(&self, zone: &str, record_type: &str, name: &str)
        -> Result<Vec<DnsRecord>>;

    /// Rewrite the record `id` in `zone`, returning the stored result
    async fn edit_record(&self, zone: &str, id: u64, edit: &RecordEdit) -> Result<DnsRecord>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}
