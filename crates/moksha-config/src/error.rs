//! Configuration error types.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {key}: {value:?}")]
    InvalidEnv { key: String, value: String },

    #[error("PROXY_REDIRECT_ORIGIN is not set; the /api proxy needs an upstream origin")]
    MissingProxyOrigin,

    #[error("Invalid proxy origin {origin:?}: {reason}")]
    InvalidProxyOrigin { origin: String, reason: String },

    #[error("Invalid static mount prefix {0:?}: must start with '/' and not end with '/'")]
    InvalidMountPrefix(String),
}
