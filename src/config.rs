use anyhow::{Context, Result};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str =
    "http://apis.data.go.kr/B552584/ArpltnInforInqireSvc/getCtprvnRltmMesureDnsty";

/// Settings for the AirKorea measurement API.
///
/// Read from the environment (a `.env` file is honoured by the binary):
///
/// | Variable                 | Default            |
/// |--------------------------|--------------------|
/// | `AIRKOREA_SERVICE_KEY`   | required           |
/// | `AIRKOREA_BASE_URL`      | [`DEFAULT_BASE_URL`] |
/// | `AIRKOREA_NUM_OF_ROWS`   | `100`              |
/// | `AIRKOREA_TIMEOUT_SECS`  | `30`               |
///
/// The service key must be the *decoded* key from data.go.kr; it is
/// percent-encoded when appended to the query string.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub service_key: String,
    pub num_of_rows: u32,
    pub page_no: u32,
    pub version: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let service_key = lookup("AIRKOREA_SERVICE_KEY")
            .filter(|k| !k.trim().is_empty())
            .context("AIRKOREA_SERVICE_KEY must be set")?;

        let num_of_rows: u32 = match lookup("AIRKOREA_NUM_OF_ROWS") {
            Some(v) => v
                .parse()
                .with_context(|| format!("AIRKOREA_NUM_OF_ROWS is not a number: '{v}'"))?,
            None => 100,
        };

        let timeout_secs: u64 = match lookup("AIRKOREA_TIMEOUT_SECS") {
            Some(v) => v
                .parse()
                .with_context(|| format!("AIRKOREA_TIMEOUT_SECS is not a number: '{v}'"))?,
            None => 30,
        };

        Ok(Self {
            base_url: lookup("AIRKOREA_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            service_key,
            num_of_rows,
            page_no: 1,
            version: "1.0".to_string(),
            timeout: Duration::from_secs(timeout_secs),
            connect_timeout: Duration::from_secs(10),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_lookup(lookup(&[("AIRKOREA_SERVICE_KEY", "abc")])).unwrap();

        assert_eq!(config.service_key, "abc");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.num_of_rows, 100);
        assert_eq!(config.page_no, 1);
        assert_eq!(config.version, "1.0");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_overrides() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("AIRKOREA_SERVICE_KEY", "abc"),
            ("AIRKOREA_BASE_URL", "http://localhost:8080/measure"),
            ("AIRKOREA_NUM_OF_ROWS", "250"),
            ("AIRKOREA_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://localhost:8080/measure");
        assert_eq!(config.num_of_rows, 250);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_missing_key_is_error() {
        assert!(ApiConfig::from_lookup(lookup(&[])).is_err());
        assert!(ApiConfig::from_lookup(lookup(&[("AIRKOREA_SERVICE_KEY", " ")])).is_err());
    }

    #[test]
    fn test_bad_number_is_error() {
        let err = ApiConfig::from_lookup(lookup(&[
            ("AIRKOREA_SERVICE_KEY", "abc"),
            ("AIRKOREA_NUM_OF_ROWS", "lots"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("AIRKOREA_NUM_OF_ROWS"));
    }
}
