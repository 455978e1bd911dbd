//! moksha-security — Request payload encryption and CSRF cookie handling.

pub mod cipher;
pub mod csrf;
pub mod error;

pub use cipher::{PayloadCipher, PAYLOAD_SECRET_ENV};
pub use csrf::{csrf_token_from_cookie_header, CSRF_COOKIE, CSRF_HEADER};
pub use error::{Result, SecurityError};
