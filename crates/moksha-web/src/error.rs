//! Server error types.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, WebError>;

#[derive(Debug, Error)]
pub enum WebError {
    #[error(transparent)]
    Config(#[from] moksha_config::ConfigError),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),

    #[error("Failed to build proxy client: {0}")]
    ProxyClient(#[from] reqwest::Error),

    #[error("Invalid cache lifetime for mount {0}")]
    InvalidCacheHeader(String),
}
