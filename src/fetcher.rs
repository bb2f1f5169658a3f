//! Per-node average usage lookup
//!
//! For each known metric kind the fetcher issues one instant query and reads
//! the first sample of the returned vector. Anything short of a clean float
//! leaves the corresponding field at zero: query failures are logged, data
//! anomalies are skipped. Only a client that cannot be built is an error.

use crate::config::FetcherConfig;
use crate::metrics::FetcherMetrics;
use crate::prometheus::{PrometheusClient, QueryApi, QueryValue};
use crate::query::MetricKind;
use crate::{PromSourceError, Result};
use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

/// Average usage ratios of one node; zero means "no usable data"
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeMetrics {
    pub cpu: f64,
    pub memory: f64,
}

impl NodeMetrics {
    fn set(&mut self, metric: MetricKind, value: f64) {
        match metric {
            MetricKind::CpuUsageAvg => self.cpu = value,
            MetricKind::MemUsageAvg => self.memory = value,
        }
    }
}

#[derive(Debug, PartialEq)]
enum Extracted<'a> {
    Value(f64),
    Empty,
    NotVector(&'static str),
    Unparseable(&'a str),
}

fn first_sample_value(value: &QueryValue) -> Extracted<'_> {
    let samples = match value {
        QueryValue::Vector(samples) => samples,
        other if other.is_empty() => return Extracted::Empty,
        other => return Extracted::NotVector(other.type_name()),
    };

    let Some(first) = samples.first() else {
        return Extracted::Empty;
    };

    match &first.value {
        Some(pair) => {
            let token = pair.value().trim();
            token
                .parse::<f64>()
                .map_or(Extracted::Unparseable(token), Extracted::Value)
        }
        None => Extracted::Unparseable(""),
    }
}

pub struct MetricsFetcher {
    config: FetcherConfig,
    metrics: FetcherMetrics,
}

impl MetricsFetcher {
    pub fn new(config: FetcherConfig) -> Result<Self> {
        Ok(Self::with_metrics(config, FetcherMetrics::new()?))
    }

    /// Share one set of counters between several fetchers
    pub fn with_metrics(config: FetcherConfig, metrics: FetcherMetrics) -> Self {
        Self { config, metrics }
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    pub fn metrics(&self) -> &FetcherMetrics {
        &self.metrics
    }

    /// Fetch CPU and memory averages of `node_name` over `period` (e.g. "5m").
    ///
    /// A fresh HTTP client is built for every call. Cancelling `cancel`
    /// aborts whichever query is in flight; the remaining fields stay zero.
    pub async fn node_metrics_avg(
        &self,
        cancel: &CancellationToken,
        node_name: &str,
        period: &str,
    ) -> Result<NodeMetrics> {
        debug!("Get node metrics from Prometheus: {}", self.config.address());

        let client = PrometheusClient::new(&self.config)?;

        Ok(self.collect(&client, cancel, node_name, period).await)
    }

    /// Query every metric kind through `api`, sequentially
    pub async fn collect<A>(
        &self,
        api: &A,
        cancel: &CancellationToken,
        node_name: &str,
        period: &str,
    ) -> NodeMetrics
    where
        A: QueryApi + ?Sized,
    {
        let mut node_metrics = NodeMetrics::default();

        for metric in MetricKind::ALL {
            let expr = metric.expr(period, node_name);
            debug!("Query prometheus by {}", expr);
            self.metrics.record_query(metric);

            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => Err(PromSourceError::Cancelled),
                result = api.query(&expr, SystemTime::now()) => result,
            };

            let outcome = match result {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!("Error querying Prometheus for {}: {}", expr, e);
                    self.metrics.record_query_error(metric);
                    continue;
                }
            };

            if !outcome.warnings.is_empty() {
                debug!("Warning querying Prometheus: {:?}", outcome.warnings);
            }

            match first_sample_value(&outcome.value) {
                Extracted::Value(value) => node_metrics.set(metric, value),
                Extracted::Empty => {
                    warn!("Warning querying Prometheus: no data found for {}", expr);
                    self.metrics.record_empty_result(metric);
                }
                Extracted::NotVector(kind) => {
                    debug!("Ignoring {} result for {}, expected vector", kind, expr);
                }
                Extracted::Unparseable(token) => {
                    debug!("Unparseable sample value {:?} for {}", token, expr);
                    self.metrics.record_parse_failure(metric);
                }
            }
        }

        node_metrics
    }
}
