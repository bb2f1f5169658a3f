use crate::config::FetcherConfig;
use crate::prometheus::types::{ApiResponse, ApiStatus};
use crate::prometheus::{QueryApi, QueryOutcome};
use crate::{PromSourceError, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// HTTP client for the Prometheus instant-query API
#[derive(Debug, Clone)]
pub struct PrometheusClient {
    http: Client,
    query_url: Url,
}

impl PrometheusClient {
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        let query_url = query_url(config.address())?;

        let mut builder =
            Client::builder().danger_accept_invalid_certs(config.insecure_skip_verify());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        let http = builder
            .build()
            .map_err(|e| PromSourceError::ClientBuild(e.to_string()))?;

        debug!("Prometheus query endpoint: {}", query_url);

        Ok(Self { http, query_url })
    }

    pub fn query_url(&self) -> &Url {
        &self.query_url
    }
}

#[async_trait]
impl QueryApi for PrometheusClient {
    async fn query(&self, expr: &str, at: SystemTime) -> Result<QueryOutcome> {
        let time = at
            .duration_since(UNIX_EPOCH)
            .map(|d| format!("{:.3}", d.as_secs_f64()))
            .unwrap_or_else(|_| "0".to_string());

        let response = self
            .http
            .get(self.query_url.clone())
            .query(&[("query", expr), ("time", time.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        // Prometheus answers 400/422/503 with a JSON error envelope
        let parsed: ApiResponse = match serde_json::from_slice(&body) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                return Err(PromSourceError::Status(status.as_u16()));
            }
            Err(e) => return Err(PromSourceError::Decode(e.to_string())),
        };

        if parsed.status == ApiStatus::Error {
            return Err(PromSourceError::Backend {
                error_type: parsed.error_type.unwrap_or_else(|| "unknown".to_string()),
                message: parsed.error.unwrap_or_default(),
            });
        }

        if !status.is_success() {
            return Err(PromSourceError::Status(status.as_u16()));
        }

        let value = parsed
            .data
            .ok_or_else(|| PromSourceError::Decode("response has no data".to_string()))?;

        Ok(QueryOutcome {
            value,
            warnings: parsed.warnings,
        })
    }
}

/// Resolve `<address>/api/v1/query`, keeping any path prefix on the address
fn query_url(address: &str) -> Result<Url> {
    let invalid = |reason: String| PromSourceError::InvalidAddress {
        address: address.to_string(),
        reason,
    };

    let mut url = Url::parse(address.trim()).map_err(|e| invalid(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme '{}'", other))),
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }

    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|_| invalid("address cannot be a base URL".to_string()))?
        .pop_if_empty()
        .extend(["api", "v1", "query"]);

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_query_url_plain() {
        let url = query_url("http://prometheus:9090").unwrap();
        assert_eq!(url.as_str(), "http://prometheus:9090/api/v1/query");
    }

    #[test]
    fn test_query_url_with_prefix_and_trailing_slash() {
        let url = query_url("https://monitoring.example/prom/").unwrap();
        assert_eq!(url.as_str(), "https://monitoring.example/prom/api/v1/query");
    }

    #[test]
    fn test_query_url_rejects_garbage() {
        let err = query_url("://not a url").unwrap_err();
        assert!(matches!(err, PromSourceError::InvalidAddress { .. }));
    }

    #[test]
    fn test_query_url_rejects_other_schemes() {
        let err = query_url("ftp://prometheus:9090").unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn test_client_honours_tls_toggle() {
        let mut options = HashMap::new();
        options.insert(
            crate::config::INSECURE_SKIP_VERIFY.to_string(),
            "true".to_string(),
        );
        let config = FetcherConfig::new("https://prometheus:9090", options);

        let client = PrometheusClient::new(&config).unwrap();
        assert_eq!(client.query_url().scheme(), "https");
    }
}
