//! moksha-common — Types and helpers shared by the Moksha server and build tooling.

pub mod build_info;
pub mod error;
pub mod logging;

pub use build_info::{BuildInfo, BUILD_INFO_FILE};
pub use error::{CommonError, Result};
