//! Application configuration.
//!
//! No config file and no CLI crate: an endpoint override via `--endpoint` or
//! the `CITADEL_ENDPOINT` environment variable is all there is.

use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://rickandmortyapi.com/graphql";

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// GraphQL endpoint URL.
    pub endpoint: String,
    /// Idle window before a search commit.
    pub search_debounce: Duration,
    /// Event-loop poll interval.
    pub tick: Duration,
    /// HTTP request timeout.
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            search_debounce: Duration::from_millis(500),
            tick: Duration::from_millis(100),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl AppConfig {
    /// Build from process args and environment.
    ///
    /// Precedence: `--endpoint URL` beats `CITADEL_ENDPOINT` beats the default.
    pub fn from_env<I>(args: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        if let Ok(endpoint) = std::env::var("CITADEL_ENDPOINT") {
            if !endpoint.is_empty() {
                config.endpoint = endpoint;
            }
        }

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--endpoint" => {
                    let url = args
                        .next()
                        .ok_or_else(|| "--endpoint requires a URL".to_string())?;
                    config.endpoint = url;
                }
                "--help" | "-h" => {
                    return Err(format!(
                        "usage: citadel [--endpoint URL]\n\ndefault endpoint: {}",
                        DEFAULT_ENDPOINT
                    ));
                }
                other => {
                    return Err(format!("unknown argument: {}", other));
                }
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.search_debounce, Duration::from_millis(500));
    }

    #[test]
    fn test_endpoint_arg() {
        let config =
            AppConfig::from_env(["--endpoint".to_string(), "http://localhost:4000".to_string()])
                .unwrap();
        assert_eq!(config.endpoint, "http://localhost:4000");
    }

    #[test]
    fn test_unknown_arg() {
        let result = AppConfig::from_env(["--bogus".to_string()]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_endpoint_value() {
        let result = AppConfig::from_env(["--endpoint".to_string()]);
        assert!(result.is_err());
    }
}
