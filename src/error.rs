use thiserror::Error;

/// Terminal failure of one run. Every variant ends the process with the
/// exit code returned by [`Error::exit_code`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("Error: environment variable '{0}' not set")]
    MissingVariable(&'static str),

    #[error("Error compiling regex: {0}")]
    Regex(#[from] regex::Error),

    #[error("Error: non-integer value for '{name}': {source}")]
    NonIntegerValue {
        name: &'static str,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("Error: invalid value for '{name}': {value}")]
    InvalidValue { name: &'static str, value: i64 },

    #[error("Error: can't get external IP-address: {0}")]
    ExternalIp(#[source] reqwest::Error),

    #[error("Error: reading response body: {0}")]
    ResponseBody(#[source] reqwest::Error),

    #[error("Error: IP-address not found in data: {0}")]
    IpNotFound(String),

    #[error("Error: from Digital Ocean API: {0:#}")]
    RecordLookup(#[source] anyhow::Error),

    #[error("Error: domain '{0}' not found in Digital Ocean API")]
    RecordNotFound(String),

    #[error("Error: from Digital Ocean API: {0:#}")]
    RecordUpdate(#[source] anyhow::Error),
}

impl Error {
    /// Process exit code for this failure. Code 4 is unassigned.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::MissingVariable(_)
            | Error::Regex(_)
            | Error::NonIntegerValue { .. }
            | Error::InvalidValue { .. } => 1,
            Error::ExternalIp(_) | Error::ResponseBody(_) | Error::IpNotFound(_) => 2,
            Error::RecordLookup(_) | Error::RecordNotFound(_) => 3,
            Error::RecordUpdate(_) => 5,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::MissingVariable("DO_DYN_API_TOKEN").exit_code(), 1);
        assert_eq!(
            Error::InvalidValue {
                name: "DO_DYN_DNS_TTL",
                value: 0
            }
            .exit_code(),
            1
        );
        assert_eq!(Error::IpNotFound(String::new()).exit_code(), 2);
        assert_eq!(
            Error::RecordLookup(anyhow::anyhow!("unauthorized")).exit_code(),
            3
        );
        assert_eq!(Error::RecordNotFound("home.example.com".into()).exit_code(), 3);
        assert_eq!(
            Error::RecordUpdate(anyhow::anyhow!("unprocessable")).exit_code(),
            5
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            Error::MissingVariable("DO_DYN_EXT_IP_URL").to_string(),
            "Error: environment variable 'DO_DYN_EXT_IP_URL' not set"
        );
        assert_eq!(
            Error::RecordNotFound("home.example.com".into()).to_string(),
            "Error: domain 'home.example.com' not found in Digital Ocean API"
        );

        let err = anyhow::anyhow!("401 Unauthorized").context("GET /domains/example.com/records");
        assert_eq!(
            Error::RecordLookup(err).to_string(),
            "Error: from Digital Ocean API: GET /domains/example.com/records: 401 Unauthorized"
        );
    }
}
