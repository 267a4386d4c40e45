mod digitalocean;
mod provider;

pub use digitalocean::DigitalOceanProvider;
pub use provider::{DnsProvider, DnsRecord, RecordEdit};

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use anyhow::{anyhow, Result};
    use async_trait::async_trait;

    use super::*;

    /// In-memory provider that records every call made to it.
    #[derive(Default)]
    pub(crate) struct RecordingProvider {
        pub records: Vec<DnsRecord>,
        pub fail_list: bool,
        pub fail_edit: bool,
        pub lists: Mutex<Vec<(String, String, String)>>,
        pub edits: Mutex<Vec<(String, u64, RecordEdit)>>,
    }

    impl RecordingProvider {
        pub(crate) fn with_record(id: u64, name: &str, data: &str, ttl: u32) -> Self {
            Self {
                records: vec![DnsRecord {
                    id,
                    record_type: "A".to_string(),
                    name: name.to_string(),
                    data: data.to_string(),
                    ttl,
                }],
                ..Default::default()
            }
        }

        pub(crate) fn list_calls(&self) -> usize {
            self.lists.lock().unwrap().len()
        }

        pub(crate) fn edit_calls(&self) -> Vec<(String, u64, RecordEdit)> {
            self.edits.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DnsProvider for RecordingProvider {
        async fn list_records(
            &self,
            zone: &str,
            record_type: &str,
            name: &str,
        ) -> Result<Vec<DnsRecord>> {
            self.lists.lock().unwrap().push((
                zone.to_string(),
                record_type.to_string(),
                name.to_string(),
            ));
            if self.fail_list {
                return Err(anyhow!("401 Unauthorized"));
            }
            Ok(self.records.clone())
        }

        async fn edit_record(&self, zone: &str, id: u64, edit: &RecordEdit) -> Result<DnsRecord> {
            self.edits
                .lock()
                .unwrap()
                .push((zone.to_string(), id, edit.clone()));
            if self.fail_edit {
                return Err(anyhow!("422 Unprocessable Entity"));
            }
            let mut record = self
                .records
                .iter()
                .find(|r| r.id == id)
                .cloned()
                .ok_or_else(|| anyhow!("404 Not Found"))?;
            record.data = edit.data.clone();
            record.ttl = edit.ttl;
            Ok(record)
        }

        fn provider_name(&self) -> &'static str {
            "recording"
        }
    }
}
