use std::fmt;

use reqwest::Client;
use tracing::info;

use crate::config::Settings;
use crate::dns::{DnsProvider, DnsRecord, RecordEdit};
use crate::error::{Error, Result};
use crate::ip;

const RECORD_TYPE: &str = "A";

/// How a run ended when nothing went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    UpToDate,
    /// The change that would have been made
    DryRun(String),
    Updated { record: DnsRecord, summary: String },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::UpToDate => write!(f, "Domain record is up to date"),
            Outcome::DryRun(summary) => write!(f, "[DRY-RUN MODE] {}", summary),
            Outcome::Updated { summary, .. } => write!(f, "{}", summary),
        }
    }
}

/// One full check-and-maybe-update cycle, narrated on stdout.
pub async fn run(
    settings: &Settings,
    client: &Client,
    provider: &dyn DnsProvider,
) -> Result<Outcome> {
    println!("Starting DO DynDNS");

    let (ext_ip, record) = check(settings, client, provider).await?;
    let outcome = reconcile(settings, provider, &ext_ip, &record).await?;

    if let Outcome::Updated { record, .. } = &outcome {
        println!("{}", record);
    }
    println!("{}", outcome);
    println!("Finished DO DynDNS");

    Ok(outcome)
}

/// Resolve the external IP and read the current record without changing
/// anything.
pub async fn check(
    settings: &Settings,
    client: &Client,
    provider: &dyn DnsProvider,
) -> Result<(String, DnsRecord)> {
    let ext_ip = ip::get_external_ip(client, &settings.ext_ip_url, &settings.ip_regex).await?;
    println!("External IP address is: {}", ext_ip);

    let fqdn = settings.fqdn();
    info!(
        "Looking up {} record {} via {}",
        RECORD_TYPE,
        fqdn,
        provider.provider_name()
    );
    let record = provider
        .list_records(&settings.domain, RECORD_TYPE, &fqdn)
        .await
        .map_err(Error::RecordLookup)?
        .into_iter()
        .next()
        .ok_or_else(|| Error::RecordNotFound(fqdn.clone()))?;

    println!(
        "Current domain record for {}: IP={} TTL={}",
        fqdn, record.data, record.ttl
    );

    Ok((ext_ip, record))
}

/// Bring `record` in line with `ext_ip` and the configured TTL.
pub async fn reconcile(
    settings: &Settings,
    provider: &dyn DnsProvider,
    ext_ip: &str,
    record: &DnsRecord,
) -> Result<Outcome> {
    let Some(summary) = change_summary(record, ext_ip, settings.ttl) else {
        return Ok(Outcome::UpToDate);
    };

    if settings.dry_run {
        info!("Dry run, leaving record {} untouched", record.id);
        return Ok(Outcome::DryRun(summary));
    }

    let edit = RecordEdit {
        data: ext_ip.to_string(),
        ttl: settings.ttl,
    };
    info!(
        "Updating record {} from {} to {}",
        record.id, record.data, ext_ip
    );
    let updated = provider
        .edit_record(&settings.domain, record.id, &edit)
        .await
        .map_err(Error::RecordUpdate)?;

    Ok(Outcome::Updated {
        record: updated,
        summary,
    })
}

/// Describe what differs between `record` and the desired state, or `None`
/// when nothing does.
fn change_summary(record: &DnsRecord, ext_ip: &str, ttl: u32) -> Option<String> {
    if record.data == ext_ip && record.ttl == ttl {
        return None;
    }

    let mut summary = String::from("Updated domain record:");
    if record.data != ext_ip {
        summary.push_str(&format!(" IP={}", ext_ip));
    }
    if record.ttl != ttl {
        summary.push_str(&format!(" TTL={}", ttl));
    }
    Some(summary)
}
