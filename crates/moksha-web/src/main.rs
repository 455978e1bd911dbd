//! Moksha site server
//!
//! Run with: cargo run -p moksha-web

use moksha_common::logging::{init_tracing, LogFormat};
use moksha_config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    init_tracing(LogFormat::for_environment(config.server.is_production()))?;
    if config.server.enable_logs {
        moksha_web::install_panic_logging();
    }

    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));
    moksha_web::serve(config).await?;

    Ok(())
}
