pub mod collector;
pub mod exporter;

pub use collector::FetcherMetrics;
pub use exporter::encode_text;
