use reqwest::StatusCode;
use thiserror::Error;

/// Message shown whenever the roster index cannot be loaded.
pub const INDEX_FAILURE_MESSAGE: &str = "Failed to load Pokémon data";

/// Errors that abort a whole roster fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The index request failed or returned a non-success status.
    #[error("{}", INDEX_FAILURE_MESSAGE)]
    IndexUnavailable { reason: String },

    /// The index answered but its body was not a Pokémon list.
    #[error("Failed to parse Pokémon index: {0}")]
    MalformedIndex(#[from] serde_json::Error),
}

/// Why a single detail lookup was dropped from the roster.
#[derive(Debug, Error)]
pub enum DetailError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected status {0}")]
    Status(StatusCode),

    #[error("invalid detail payload: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("malformed detail: {reason}")]
    Malformed { reason: String },
}
