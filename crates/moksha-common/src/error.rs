use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommonError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Logging already initialised: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, CommonError>;
