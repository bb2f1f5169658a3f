use crate::query::MetricKind;
use crate::{PromSourceError, Result};
use prometheus::{IntCounterVec, Opts, Registry};

/// Self-observability counters for the fetcher, labelled by metric kind
#[derive(Clone)]
pub struct FetcherMetrics {
    registry: Registry,
    queries_total: IntCounterVec,
    query_errors_total: IntCounterVec,
    empty_results_total: IntCounterVec,
    value_parse_failures_total: IntCounterVec,
}

impl FetcherMetrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let queries_total = register(
            &registry,
            "promsource_queries_total",
            "Instant queries issued to the monitoring backend",
        )?;
        let query_errors_total = register(
            &registry,
            "promsource_query_errors_total",
            "Instant queries that failed before returning data",
        )?;
        let empty_results_total = register(
            &registry,
            "promsource_empty_results_total",
            "Instant queries that returned no samples",
        )?;
        let value_parse_failures_total = register(
            &registry,
            "promsource_value_parse_failures_total",
            "Sample values that could not be parsed as floats",
        )?;

        Ok(Self {
            registry,
            queries_total,
            query_errors_total,
            empty_results_total,
            value_parse_failures_total,
        })
    }

    pub fn record_query(&self, metric: MetricKind) {
        self.queries_total
            .with_label_values(&[metric.as_str()])
            .inc();
    }

    pub fn record_query_error(&self, metric: MetricKind) {
        self.query_errors_total
            .with_label_values(&[metric.as_str()])
            .inc();
    }

    pub fn record_empty_result(&self, metric: MetricKind) {
        self.empty_results_total
            .with_label_values(&[metric.as_str()])
            .inc();
    }

    pub fn record_parse_failure(&self, metric: MetricKind) {
        self.value_parse_failures_total
            .with_label_values(&[metric.as_str()])
            .inc();
    }

    pub fn queries(&self, metric: MetricKind) -> u64 {
        self.queries_total
            .with_label_values(&[metric.as_str()])
            .get()
    }

    pub fn query_errors(&self, metric: MetricKind) -> u64 {
        self.query_errors_total
            .with_label_values(&[metric.as_str()])
            .get()
    }

    pub fn empty_results(&self, metric: MetricKind) -> u64 {
        self.empty_results_total
            .with_label_values(&[metric.as_str()])
            .get()
    }

    pub fn parse_failures(&self, metric: MetricKind) -> u64 {
        self.value_parse_failures_total
            .with_label_values(&[metric.as_str()])
            .get()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

fn register(registry: &Registry, name: &str, help: &str) -> Result<IntCounterVec> {
    let counter = IntCounterVec::new(Opts::new(name, help), &["metric"])
        .map_err(|e| PromSourceError::Config(format!("invalid counter {}: {}", name, e)))?;

    registry
        .register(Box::new(counter.clone()))
        .map_err(|e| PromSourceError::Config(format!("failed to register {}: {}", name, e)))?;

    Ok(counter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_are_per_metric() {
        let metrics = FetcherMetrics::new().unwrap();

        metrics.record_query(MetricKind::CpuUsageAvg);
        metrics.record_query(MetricKind::CpuUsageAvg);
        metrics.record_parse_failure(MetricKind::MemUsageAvg);

        assert_eq!(metrics.queries(MetricKind::CpuUsageAvg), 2);
        assert_eq!(metrics.queries(MetricKind::MemUsageAvg), 0);
        assert_eq!(metrics.parse_failures(MetricKind::MemUsageAvg), 1);
        assert_eq!(metrics.query_errors(MetricKind::CpuUsageAvg), 0);
    }

    #[test]
    fn test_clones_share_counters() {
        let metrics = FetcherMetrics::new().unwrap();
        let clone = metrics.clone();

        clone.record_empty_result(MetricKind::CpuUsageAvg);

        assert_eq!(metrics.empty_results(MetricKind::CpuUsageAvg), 1);
    }
}
