//! Symmetric encryption of JSON request bodies.
//!
//! Wire format: standard base64 of `nonce (12 bytes) || ciphertext || tag (16 bytes)`,
//! AES-256-GCM with the key derived as SHA-256 of the shared secret.

use std::fmt;

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rand::RngCore;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::{Result, SecurityError};

/// Environment variable holding the shared payload secret.
pub const PAYLOAD_SECRET_ENV: &str = "PAYLOAD_SECRET";

const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;

#[derive(Clone)]
pub struct PayloadCipher {
    cipher: Aes256Gcm,
}

impl fmt::Debug for PayloadCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PayloadCipher").field("key", &"[redacted]").finish()
    }
}

impl PayloadCipher {
    pub fn new(secret: SecretString) -> Result<Self> {
        let secret = secret.expose_secret();
        if secret.is_empty() {
            return Err(SecurityError::MissingSecret);
        }
        let key = Sha256::digest(secret.as_bytes());
        let cipher = Aes256Gcm::new_from_slice(&key).map_err(|_| SecurityError::Encrypt)?;
        Ok(Self { cipher })
    }

    /// Build from `PAYLOAD_SECRET`. Unset and empty are both `MissingSecret`.
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var(PAYLOAD_SECRET_ENV).map_err(|_| {
            tracing::error!("{PAYLOAD_SECRET_ENV} is not defined");
            SecurityError::MissingSecret
        })?;
        Self::new(SecretString::from(secret))
    }

    pub fn encrypt(&self, plaintext: &[u8]) -> Result<String> {
        let mut nonce = [0u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce);

        let sealed = self
            .cipher
            .encrypt(Nonce::from_slice(&nonce), plaintext)
            .map_err(|_| SecurityError::Encrypt)?;

        let mut out = Vec::with_capacity(NONCE_LEN + sealed.len());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&sealed);
        Ok(STANDARD.encode(out))
    }

    /// Serialize `value` to JSON, then encrypt the JSON text.
    pub fn encrypt_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let json = serde_json::to_string(value)?;
        self.encrypt(json.as_bytes())
    }

    pub fn decrypt(&self, payload: &str) -> Result<Vec<u8>> {
        let raw = STANDARD.decode(payload.trim())?;
        if raw.len() < NONCE_LEN + TAG_LEN {
            return Err(SecurityError::Decrypt);
        }
        let (nonce, sealed) = raw.split_at(NONCE_LEN);
        self.cipher
            .decrypt(Nonce::from_slice(nonce), sealed)
            .map_err(|_| SecurityError::Decrypt)
    }

    pub fn decrypt_json<T: DeserializeOwned>(&self, payload: &str) -> Result<T> {
        let plain = self.decrypt(payload)?;
        Ok(serde_json::from_slice(&plain)?)
    }
}
