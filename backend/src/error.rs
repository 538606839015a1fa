use std::path::PathBuf;
use thiserror::Error;

/// Why a single city's upstream fetch failed.
///
/// These never leave the fetcher as errors: every variant collapses into the
/// same sentinel `PriceRecord`, differing only in the message.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Upstream request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Upstream returned malformed JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Upstream returned no price data: {0}")]
    MissingData(String),
}

/// Request-level failures that propagate to the HTTP layer
#[derive(Error, Debug)]
pub enum BoardError {
    #[error("Cannot read city list {}: {source}", .path.display())]
    CityList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("City not found: {0}")]
    UnknownCity(String),
}

pub type Result<T> = std::result::Result<T, BoardError>;
