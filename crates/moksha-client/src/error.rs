use thiserror::Error;

use moksha_security::SecurityError;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Security(#[from] SecurityError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid API URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid header value for {0}")]
    InvalidHeader(&'static str),
}
