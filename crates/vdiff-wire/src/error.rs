use thiserror::Error;

#[derive(Debug, Error)]
pub enum WireError {
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("malformed script: {0}")]
    Json(#[from] serde_json::Error),

    #[error("script is not a JSON array of records")]
    NotAnArray,

    #[error("record #{index} is not a valid operation")]
    InvalidRecord { index: usize },
}

pub type WireResult<T> = Result<T, WireError>;
