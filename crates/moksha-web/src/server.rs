//! Listener setup, startup message and graceful shutdown.

use moksha_common::BuildInfo;
use moksha_config::Config;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};

use crate::error::{Result, WebError};
use crate::router::build_router;
use crate::state::AppState;

/// Bind and serve until Ctrl+C or SIGTERM.
pub async fn serve(config: Config) -> Result<()> {
    let production = config.server.is_production();
    let port = config.server.port;
    let addr = config.server.bind_addr();

    match BuildInfo::read_from(&config.server.dist_dir) {
        Ok(Some(build)) => info!(
            "Serving build {} ({}) from {}",
            build.version, build.build_time, config.server.dist_dir.display()
        ),
        Ok(None) => {}
        Err(e) => warn!("Ignoring unreadable build record: {e}"),
    }

    let state = AppState::new(config)?;
    info!("Proxying /api to {}", state.proxy.origin());
    let app = build_router(state);

    let listener = TcpListener::bind(&addr).await.map_err(|source| {
        error!("Server error: failed to bind {addr}: {source}");
        WebError::Bind { addr: addr.clone(), source }
    })?;

    if production {
        info!("Server started at port {port}");
    } else {
        info!("Server started at http://localhost:{port}");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("Server error: {e}");
            WebError::Serve(e)
        })?;

    info!("Server shutting down...");
    Ok(())
}

/// Route panics through tracing so they land in the same log stream as requests.
pub fn install_panic_logging() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        error!("Uncaught panic: {panic_info}");
        default_hook(panic_info);
    }));
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
