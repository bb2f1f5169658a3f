pub mod client;
pub mod types;

use crate::Result;
use async_trait::async_trait;
use std::time::SystemTime;

pub use client::PrometheusClient;
pub use types::{QueryValue, Sample, SamplePair, SampleStream};

/// Result of a successful instant query
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    pub value: QueryValue,
    pub warnings: Vec<String>,
}

/// Instant-query surface of a monitoring backend
#[async_trait]
pub trait QueryApi: Send + Sync {
    async fn query(&self, expr: &str, at: SystemTime) -> Result<QueryOutcome>;
}
