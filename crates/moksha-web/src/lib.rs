//! moksha-web — Site server for the Moksha festival SPA.
//!
//! Serves the built bundle from the dist directory, forwards `/api` to the
//! backend origin and answers every other path with `index.html` so the
//! client-side router can take over.

pub mod error;
pub mod handlers;
pub mod proxy;
pub mod router;
pub mod server;
pub mod state;
pub mod static_mount;

pub use error::{Result, WebError};
pub use server::{install_panic_logging, serve};
