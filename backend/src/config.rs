use anyhow::Context;
use std::path::PathBuf;
use std::time::Duration;

/// Default upstream host, also sent as `x-rapidapi-host`
pub const DEFAULT_API_HOST: &str = "gold-silver-live-price-india.p.rapidapi.com";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Newline-delimited city list, re-read on every request
    pub cities_file: PathBuf,

    /// Maximum number of upstream calls in flight per request
    pub max_concurrent_fetches: usize,

    /// Default `limit` for `/api/all-prices`
    pub default_price_limit: usize,

    /// Upstream price API settings
    pub upstream: UpstreamConfig,
}

#[derive(Clone)]
pub struct UpstreamConfig {
    /// Scheme and host the request path is appended to
    pub base_url: String,

    /// Value of the `x-rapidapi-host` header
    pub api_host: String,

    /// Value of the `x-rapidapi-key` header
    pub api_key: String,

    /// Request timeout; `None` keeps the transport default
    pub timeout: Option<Duration>,
}

// Keep the key out of `{:?}` output and therefore out of the logs.
impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("base_url", &self.base_url)
            .field("api_host", &self.api_host)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key/value source
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("RAPIDAPI_KEY")
            .filter(|key| !key.trim().is_empty())
            .context("RAPIDAPI_KEY must be set")?;
        let api_host = lookup("RAPIDAPI_HOST").unwrap_or_else(|| DEFAULT_API_HOST.to_string());
        let base_url = lookup("PRICE_API_BASE_URL")
            .unwrap_or_else(|| format!("https://{}", api_host))
            .trim_end_matches('/')
            .to_string();

        let timeout = match lookup("PRICE_API_TIMEOUT_SECS") {
            Some(secs) => Some(Duration::from_secs(
                secs.parse().context("PRICE_API_TIMEOUT_SECS must be a number of seconds")?,
            )),
            None => None,
        };

        Ok(Config {
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port: lookup("SERVER_PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .context("SERVER_PORT must be a port number")?,
            cities_file: lookup("CITIES_FILE")
                .unwrap_or_else(|| "cities_list.txt".to_string())
                .into(),
            max_concurrent_fetches: lookup("MAX_CONCURRENT_FETCHES")
                .unwrap_or_else(|| "4".to_string())
                .parse::<usize>()
                .context("MAX_CONCURRENT_FETCHES must be a positive integer")?
                .max(1),
            default_price_limit: lookup("DEFAULT_PRICE_LIMIT")
                .unwrap_or_else(|| "20".to_string())
                .parse()
                .context("DEFAULT_PRICE_LIMIT must be a positive integer")?,
            upstream: UpstreamConfig {
                base_url,
                api_host,
                api_key,
                timeout,
            },
        })
    }

    /// Address the HTTP server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[("RAPIDAPI_KEY", "secret")])).unwrap();

        assert_eq!(config.upstream.api_key, "secret");
        assert_eq!(config.upstream.api_host, DEFAULT_API_HOST);
        assert_eq!(
            config.upstream.base_url,
            "https://gold-silver-live-price-india.p.rapidapi.com"
        );
        assert!(config.upstream.timeout.is_none());
        assert_eq!(config.cities_file, PathBuf::from("cities_list.txt"));
        assert_eq!(config.max_concurrent_fetches, 4);
        assert_eq!(config.default_price_limit, 20);
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_missing_api_key_is_rejected() {
        assert!(Config::from_lookup(lookup_from(&[])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("RAPIDAPI_KEY", "  ")])).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("RAPIDAPI_KEY", "secret"),
            ("PRICE_API_BASE_URL", "http://127.0.0.1:9000/"),
            ("PRICE_API_TIMEOUT_SECS", "5"),
            ("MAX_CONCURRENT_FETCHES", "0"),
            ("SERVER_PORT", "3000"),
            ("CITIES_FILE", "/etc/gold/cities.txt"),
        ]))
        .unwrap();

        assert_eq!(config.upstream.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.upstream.timeout, Some(Duration::from_secs(5)));
        // Zero would stall the fan-out
        assert_eq!(config.max_concurrent_fetches, 1);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cities_file, PathBuf::from("/etc/gold/cities.txt"));
    }

    #[test]
    fn test_invalid_port() {
        let result = Config::from_lookup(lookup_from(&[
            ("RAPIDAPI_KEY", "secret"),
            ("SERVER_PORT", "eighty"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = Config::from_lookup(lookup_from(&[("RAPIDAPI_KEY", "super-secret")])).unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("<redacted>"));
    }
}
