//! Tracing subscriber setup shared by the binaries.

use tracing_subscriber::EnvFilter;

use crate::error::{CommonError, Result};

const DEFAULT_FILTER: &str = "moksha=info,info";

/// Output style of log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human readable single-line output for local development.
    Compact,
    /// One JSON object per line, for log collectors in production.
    Json,
}

impl LogFormat {
    pub fn for_environment(production: bool) -> Self {
        if production { LogFormat::Json } else { LogFormat::Compact }
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing(format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = match format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    installed.map_err(|e| CommonError::Logging(e.to_string()))
}
