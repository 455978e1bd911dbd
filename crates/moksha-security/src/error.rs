//! Security error types.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SecurityError>;

#[derive(Debug, Error)]
pub enum SecurityError {
    #[error("Encryption failed: payload secret is not defined")]
    MissingSecret,

    #[error("Encryption failed")]
    Encrypt,

    #[error("Decryption failed: payload is malformed or was tampered with")]
    Decrypt,

    #[error("Invalid base64 payload: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
