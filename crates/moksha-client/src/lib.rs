//! moksha-client — Builds requests against the festival API.
//!
//! Requests go to `{base}/api/{path}` with cookies kept in a shared jar.
//! State-changing requests echo the `csrftoken` cookie as `x-csrftoken`, and
//! any body is JSON-encoded then encrypted with the configured
//! [`PayloadCipher`](moksha_security::PayloadCipher).

pub mod client;
pub mod error;
pub mod options;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use error::{ClientError, Result};
pub use options::{RequestMethod, RequestOptions};
