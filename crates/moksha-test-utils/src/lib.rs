//! Fixtures shared by the Moksha integration tests.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use axum::Router;
use moksha_config::Config;
use tempfile::TempDir;

pub const INDEX_HTML: &str =
    "<!doctype html><html><head><title>Moksha</title></head><body><div id=\"root\"></div></body></html>";

/// A throw-away dist directory laid out like a production build.
pub struct TempDist {
    dir: TempDir,
}

impl TempDist {
    /// Empty dist directory with no files at all.
    pub fn empty() -> anyhow::Result<Self> {
        Ok(Self { dir: tempfile::tempdir()? })
    }

    /// Dist directory with `index.html` and the static subdirectories in place.
    pub fn new() -> anyhow::Result<Self> {
        let dist = Self::empty()?;
        dist.file("index.html", INDEX_HTML)?;
        for sub in ["assets", "images", "logos", "moksha"] {
            std::fs::create_dir_all(dist.path().join(sub))?;
        }
        Ok(dist)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `contents` at `relative`, creating parent directories.
    pub fn file(&self, relative: &str, contents: impl AsRef<[u8]>) -> anyhow::Result<PathBuf> {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    /// Default configuration pointed at this directory and the given upstream.
    pub fn config(&self, origin: &str) -> Config {
        let mut config = Config::default();
        config.server.dist_dir = self.path().to_path_buf();
        config.server.enable_logs = false;
        config.proxy.origin = Some(origin.to_string());
        config
    }
}

/// Serve `app` on an ephemeral local port and return its address.
pub async fn spawn_upstream(app: Router) -> anyhow::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(addr)
}

/// An address nothing is listening on.
pub async fn closed_port() -> anyhow::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(addr)
}
