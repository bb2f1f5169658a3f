//! Fetcher configuration
//!
//! The scheduler hands the fetcher an endpoint address plus a flat
//! string-keyed option map. Only a couple of keys are meaningful; the rest
//! are ignored so that callers can share one map across several sources.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Option key toggling TLS certificate verification
pub const INSECURE_SKIP_VERIFY: &str = "tls.insecureSkipVerify";

/// Option key for the per-request HTTP timeout, in whole seconds
pub const REQUEST_TIMEOUT_SECONDS: &str = "request.timeoutSeconds";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetcherConfig {
    address: String,
    #[serde(default)]
    options: HashMap<String, String>,
}

impl FetcherConfig {
    pub fn new(address: impl Into<String>, options: HashMap<String, String>) -> Self {
        Self {
            address: address.into(),
            options,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    /// Only the exact string "true" disables certificate verification
    pub fn insecure_skip_verify(&self) -> bool {
        self.option(INSECURE_SKIP_VERIFY) == Some("true")
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.option(REQUEST_TIMEOUT_SECONDS)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_options(pairs: &[(&str, &str)]) -> FetcherConfig {
        let options = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        FetcherConfig::new("http://prometheus:9090", options)
    }

    #[test]
    fn test_insecure_skip_verify_defaults_to_false() {
        assert!(!with_options(&[]).insecure_skip_verify());
        assert!(!with_options(&[(INSECURE_SKIP_VERIFY, "false")]).insecure_skip_verify());
        assert!(!with_options(&[(INSECURE_SKIP_VERIFY, "TRUE")]).insecure_skip_verify());
    }

    #[test]
    fn test_insecure_skip_verify_enabled() {
        assert!(with_options(&[(INSECURE_SKIP_VERIFY, "true")]).insecure_skip_verify());
    }

    #[test]
    fn test_request_timeout() {
        assert_eq!(with_options(&[]).request_timeout(), None);
        assert_eq!(
            with_options(&[(REQUEST_TIMEOUT_SECONDS, "15")]).request_timeout(),
            Some(Duration::from_secs(15))
        );
        assert_eq!(
            with_options(&[(REQUEST_TIMEOUT_SECONDS, "0")]).request_timeout(),
            None
        );
        assert_eq!(
            with_options(&[(REQUEST_TIMEOUT_SECONDS, "soon")]).request_timeout(),
            None
        );
    }

    #[test]
    fn test_deserialize_without_options() {
        let config: FetcherConfig =
            serde_json::from_str(r#"{"address": "https://prom.example:9090"}"#).unwrap();
        assert_eq!(config.address(), "https://prom.example:9090");
        assert!(!config.insecure_skip_verify());
    }
}
