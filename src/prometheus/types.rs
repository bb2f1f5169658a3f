//! Response model for the Prometheus `/api/v1/query` endpoint
//!
//! Envelope:
//! `{"status": "success"|"error", "data": {...}, "errorType": .., "error": .., "warnings": [..]}`
//!
//! `data` is `{"resultType": "vector"|"matrix"|"scalar"|"string", "result": ...}`.
//! Sample values arrive as `[<unix seconds>, "<value>"]`, the value being a
//! string so that NaN and the infinities survive JSON.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status: ApiStatus,
    #[serde(default)]
    pub data: Option<QueryValue>,
    #[serde(default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "resultType", content = "result", rename_all = "lowercase")]
pub enum QueryValue {
    Vector(Vec<Sample>),
    Matrix(Vec<SampleStream>),
    Scalar(SamplePair),
    String(SamplePair),
}

impl QueryValue {
    pub const fn type_name(&self) -> &'static str {
        match self {
            QueryValue::Vector(_) => "vector",
            QueryValue::Matrix(_) => "matrix",
            QueryValue::Scalar(_) => "scalar",
            QueryValue::String(_) => "string",
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            QueryValue::Vector(samples) => samples.is_empty(),
            QueryValue::Matrix(streams) => streams.is_empty(),
            QueryValue::Scalar(_) | QueryValue::String(_) => false,
        }
    }
}

/// `[timestamp, "value"]`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SamplePair(pub f64, pub String);

impl SamplePair {
    pub fn timestamp(&self) -> f64 {
        self.0
    }

    pub fn value(&self) -> &str {
        &self.1
    }
}

/// One row of an instant vector
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Sample {
    #[serde(default)]
    pub metric: BTreeMap<String, String>,
    // Native histogram samples carry `histogram` instead of `value`
    #[serde(default)]
    pub value: Option<SamplePair>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SampleStream {
    #[serde(default)]
    pub metric: BTreeMap<String, String>,
    #[serde(default)]
    pub values: Vec<SamplePair>,
}

fn write_labels(f: &mut fmt::Formatter<'_>, labels: &BTreeMap<String, String>) -> fmt::Result {
    if let Some(name) = labels.get("__name__") {
        write!(f, "{}", name)?;
    }
    write!(f, "{{")?;
    let mut first = true;
    for (key, value) in labels.iter().filter(|(k, _)| k.as_str() != "__name__") {
        if !first {
            write!(f, ", ")?;
        }
        write!(f, "{}=\"{}\"", key, value)?;
        first = false;
    }
    write!(f, "}}")
}

impl fmt::Display for SamplePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @[{:.3}]", self.1, self.0)
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_labels(f, &self.metric)?;
        match &self.value {
            Some(pair) => write!(f, " => {}", pair),
            None => write!(f, " => <histogram>"),
        }
    }
}

impl fmt::Display for SampleStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_labels(f, &self.metric)?;
        write!(f, " =>")?;
        for pair in &self.values {
            write!(f, "\n{}", pair)?;
        }
        Ok(())
    }
}

/// Textual rendering, one row per line: `{labels} => <value> @[<timestamp>]`
impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Vector(samples) => {
                for (i, sample) in samples.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}", sample)?;
                }
                Ok(())
            }
            QueryValue::Matrix(streams) => {
                for (i, stream) in streams.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}", stream)?;
                }
                Ok(())
            }
            QueryValue::Scalar(pair) => write!(f, "scalar: {}", pair),
            QueryValue::String(pair) => write!(f, "string: {}", pair),
        }
    }
}
