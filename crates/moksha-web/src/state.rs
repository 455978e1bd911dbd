//! Shared application state for the web server.

use std::path::PathBuf;
use std::sync::Arc;

use moksha_config::Config;
use tracing::debug;

use crate::error::Result;
use crate::proxy::ApiProxy;
use crate::static_mount::MountPoint;

/// Shared state injected into every Axum handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Config,
    pub dist_dir: PathBuf,
    /// Tried in declaration order before the dist root.
    pub mounts: Vec<MountPoint>,
    pub proxy: ApiProxy,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let dist_dir = config.server.dist_dir.clone();
        let mounts = config
            .mounts
            .iter()
            .map(|mount| MountPoint::resolve(mount, &dist_dir))
            .collect::<Result<Vec<_>>>()?;

        for mount in &mounts {
            if !mount.dir.is_dir() {
                debug!("Static directory {} for {} does not exist yet", mount.dir.display(), mount.prefix);
            }
        }

        let proxy = ApiProxy::new(config.proxy.origin_url()?, config.proxy.timeout())?;

        Ok(Self { config, dist_dir, mounts, proxy })
    }

    pub fn index_file(&self) -> PathBuf {
        self.dist_dir.join("index.html")
    }
}

pub type SharedState = Arc<AppState>;
