//! Client configuration.

use std::env;
use std::time::Duration;

use tracing::warn;

/// Public rasdaman demo endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://ows.rasdaman.org/rasdaman/ows";

/// Settings for [`HttpTransport`](crate::transport::HttpTransport).
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// WCPS endpoint queries are posted to
    pub endpoint: String,
    /// Whole-request timeout
    pub request_timeout: Duration,
    /// TCP connect timeout
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
            user_agent: concat!("wcps-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Load from `WCPS_ENDPOINT`, `WCPS_TIMEOUT_SECS` and
    /// `WCPS_CONNECT_TIMEOUT_SECS`, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let endpoint = lookup("WCPS_ENDPOINT")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.endpoint);

        Self {
            endpoint,
            request_timeout: secs_or(&lookup, "WCPS_TIMEOUT_SECS", defaults.request_timeout),
            connect_timeout: secs_or(
                &lookup,
                "WCPS_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout,
            ),
            user_agent: defaults.user_agent,
        }
    }
}

fn secs_or<F>(lookup: &F, key: &str, default: Duration) -> Duration
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Duration::from_secs(secs),
            _ => {
                warn!(key = key, value = %raw, "Invalid timeout, using default");
                default
            }
        },
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_env_overrides() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("WCPS_ENDPOINT", "http://localhost:8080/rasdaman/ows"),
            ("WCPS_TIMEOUT_SECS", "5"),
            ("WCPS_CONNECT_TIMEOUT_SECS", "2"),
        ]));
        assert_eq!(config.endpoint, "http://localhost:8080/rasdaman/ows");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.connect_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_invalid_timeouts_fall_back() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("WCPS_TIMEOUT_SECS", "soon"),
            ("WCPS_CONNECT_TIMEOUT_SECS", "0"),
        ]));
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
    }
}
