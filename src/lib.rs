pub mod cli;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod metrics;
pub mod prometheus;
pub mod query;

pub use config::FetcherConfig;
pub use error::{PromSourceError, Result};
pub use fetcher::{MetricsFetcher, NodeMetrics};
pub use query::MetricKind;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
