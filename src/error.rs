//! Error types for lextrie

use thiserror::Error;

/// Result type alias for lextrie operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in lextrie operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed trie data: {0}")]
    MalformedTrieData(String),
}
