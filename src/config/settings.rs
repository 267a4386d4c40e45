use std::env;
use std::fmt;

use regex::Regex;

use crate::error::{Error, Result};

pub const DRY_RUN_VAR: &str = "DO_DYN_DRY_RUN";
pub const EXT_IP_URL_VAR: &str = "DO_DYN_EXT_IP_URL";
pub const IP_REGEX_VAR: &str = "DO_DYN_IP_REGEX";
pub const API_TOKEN_VAR: &str = "DO_DYN_API_TOKEN";
pub const DOMAIN_VAR: &str = "DO_DYN_DO_DOMAIN";
pub const RECORD_NAME_VAR: &str = "DO_DYN_RECORD_NAME";
pub const DNS_TTL_VAR: &str = "DO_DYN_DNS_TTL";

/// Four dot-separated groups of one to three ASCII digits.
pub const DEFAULT_IP_REGEX: &str =
    r"(?-u:\b)([0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3})(?-u:\b)";
pub const DEFAULT_TTL: u32 = 60;

#[derive(Clone)]
pub struct Settings {
    pub dry_run: bool,
    pub ext_ip_url: String,
    pub ip_regex: Regex,
    pub api_token: String,
    pub domain: String,
    pub record_name: String,
    pub ttl: u32,
}

impl Settings {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through `lookup`, which returns the raw value of a
    /// variable. Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &'static str, default: Option<&str>| -> Result<String> {
            match lookup(key).filter(|v| !v.is_empty()) {
                Some(value) => Ok(value),
                None => default
                    .map(str::to_string)
                    .ok_or(Error::MissingVariable(key)),
            }
        };

        let dry_run = get(DRY_RUN_VAR, Some("0"))? == "1";
        let ext_ip_url = get(EXT_IP_URL_VAR, None)?;
        let ip_regex = Regex::new(&get(IP_REGEX_VAR, Some(DEFAULT_IP_REGEX))?)?;
        let api_token = get(API_TOKEN_VAR, None)?;
        let domain = get(DOMAIN_VAR, None)?;
        let record_name = get(RECORD_NAME_VAR, None)?;
        let ttl = parse_ttl(&get(DNS_TTL_VAR, Some("60"))?)?;

        Ok(Self {
            dry_run,
            ext_ip_url,
            ip_regex,
            api_token,
            domain,
            record_name,
            ttl,
        })
    }

    /// Fully-qualified name of the managed record.
    pub fn fqdn(&self) -> String {
        format!("{}.{}", self.record_name, self.domain)
    }
}

fn parse_ttl(raw: &str) -> Result<u32> {
    let value: i64 = raw.parse().map_err(|source| Error::NonIntegerValue {
        name: DNS_TTL_VAR,
        source,
    })?;

    if value < 1 {
        return Err(Error::InvalidValue {
            name: DNS_TTL_VAR,
            value,
        });
    }

    u32::try_from(value).map_err(|_| Error::InvalidValue {
        name: DNS_TTL_VAR,
        value,
    })
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("dry_run", &self.dry_run)
            .field("ext_ip_url", &self.ext_ip_url)
            .field("ip_regex", &self.ip_regex.as_str())
            .field("api_token", &"<REDACTED>")
            .field("domain", &self.domain)
            .field("record_name", &self.record_name)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}={}", DRY_RUN_VAR, if self.dry_run { "1" } else { "0" })?;
        writeln!(f, "{}={}", EXT_IP_URL_VAR, self.ext_ip_url)?;
        writeln!(f, "{}={}", IP_REGEX_VAR, self.ip_regex.as_str())?;
        writeln!(f, "{}=<redacted>", API_TOKEN_VAR)?;
        writeln!(f, "{}={}", DOMAIN_VAR, self.domain)?;
        writeln!(f, "{}={}", RECORD_NAME_VAR, self.record_name)?;
        write!(f, "{}={}", DNS_TTL_VAR, self.ttl)
    }
}
