use thiserror::Error;

#[derive(Error, Debug)]
pub enum PromSourceError {
    #[error("Invalid monitoring endpoint address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {0} from monitoring backend")]
    Status(u16),

    #[error("Monitoring backend error ({error_type}): {message}")]
    Backend { error_type: String, message: String },

    #[error("Failed to decode query response: {0}")]
    Decode(String),

    #[error("Query cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PromSourceError>;
