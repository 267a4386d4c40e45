use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::debug;

use super::provider::{DnsProvider, DnsRecord, RecordEdit};

const DIGITALOCEAN_API_BASE: &str = "https://api.digitalocean.com/v2";

pub struct DigitalOceanProvider {
    client: Client,
    api_token: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct RecordsResponse {
    domain_records: Vec<DnsRecord>,
}

#[derive(Debug, Deserialize)]
struct RecordResponse {
    domain_record: DnsRecord,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    id: String,
    message: String,
}

impl DigitalOceanProvider {
    pub fn new(api_token: &str) -> Result<Self> {
        Self::with_base_url(api_token, DIGITALOCEAN_API_BASE)
    }

    pub fn with_base_url(api_token: &str, base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_token: api_token.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl std::fmt::Debug for DigitalOceanProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigitalOceanProvider")
            .field("api_token", &"<REDACTED>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Turn a non-success response into an error naming the request and the
/// API's own message.
async fn check_response(method: &str, url: &str, response: Response) -> Result<Response> {
    let status = response.status();
    debug!("{} {} -> {}", method, url, status);

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = match serde_json::from_str::<ApiError>(&body) {
        Ok(err) if err.id.is_empty() => err.message,
        Ok(err) => format!("{} ({})", err.message, err.id),
        Err(_) => body,
    };

    Err(anyhow!("{} {}: {} {}", method, url, status, detail))
}

#[async_trait]
impl DnsProvider for DigitalOceanProvider {
    async fn list_records(
        &self,
        zone: &str,
        record_type: &str,
        name: &str,
    ) -> Result<Vec<DnsRecord>> {
        let url = format!("{}/domains/{}/records", self.base_url, zone);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_token)
            .query(&[("type", record_type), ("name", name)])
            .send()
            .await
            .context("Failed to send request to DigitalOcean API")?;

        let records: RecordsResponse = check_response("GET", &url, response)
            .await?
            .json()
            .await
            .context("Failed to parse DigitalOcean API response")?;

        Ok(records.domain_records)
    }

    async fn edit_record(&self, zone: &str, id: u64, edit: &RecordEdit) -> Result<DnsRecord> {
        let url = format!("{}/domains/{}/records/{}", self.base_url, zone, id);

        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.api_token)
            .json(edit)
            .send()
            .await
            .context("Failed to send update request to DigitalOcean API")?;

        let record: RecordResponse = check_response("PUT", &url, response)
            .await?
            .json()
            .await
            .context("Failed to parse DigitalOcean API response")?;

        Ok(record.domain_record)
    }

    fn provider_name(&self) -> &'static str {
        "digitalocean"
    }
}
