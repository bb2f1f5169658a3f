use crate::metrics::collector::FetcherMetrics;
use crate::{PromSourceError, Result};
use prometheus::{Encoder, TextEncoder};

/// Render the fetcher's counters in the Prometheus text exposition format
pub fn encode_text(metrics: &FetcherMetrics) -> Result<String> {
    let encoder = TextEncoder::new();
    let families = metrics.registry().gather();

    let mut buffer = Vec::new();
    encoder
        .encode(&families, &mut buffer)
        .map_err(|e| PromSourceError::Config(format!("failed to encode metrics: {}", e)))?;

    String::from_utf8(buffer)
        .map_err(|e| PromSourceError::Config(format!("metrics output is not UTF-8: {}", e)))
}
