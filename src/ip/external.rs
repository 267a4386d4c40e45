use regex::Regex;
use reqwest::Client;
use tracing::debug;

use crate::error::{Error, Result};

/// Fetch `url` and return the first match of `pattern` in the response body.
///
/// The status code is not checked: any response that arrives is scanned, and
/// only transport failures are errors. When nothing matches, or the match is
/// empty, the whole body is carried in the error for diagnosis.
pub async fn get_external_ip(client: &Client, url: &str, pattern: &Regex) -> Result<String> {
    let response = client.get(url).send().await.map_err(Error::ExternalIp)?;
    debug!("External IP service {} answered {}", url, response.status());

    let body = response.text().await.map_err(Error::ResponseBody)?;

    match pattern.find(&body) {
        Some(m) if !m.as_str().is_empty() => Ok(m.as_str().to_string()),
        _ => Err(Error::IpNotFound(body)),
    }
}
