//! Configuration loading for the Moksha site server.
//!
//! Values are layered: built-in defaults, then an optional TOML file
//! (`MOKSHA_CONFIG`, or `moksha.toml` in the current directory), then the
//! environment variables the deployment sets (`PROXY_PORT`, `ENABLE_LOGS`,
//! `PROXY_ENV`, `PROXY_REDIRECT_ORIGIN`, `DIST_DIR`, `PROXY_TIMEOUT_SECS`).

pub mod error;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

pub use error::{ConfigError, Result};

pub const CONFIG_PATH_ENV: &str = "MOKSHA_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "moksha.toml";

const ONE_DAY: u64 = 86_400;
const THIRTY_DAYS: u64 = 2_592_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub proxy: ProxyConfig,
    #[serde(default = "default_mounts")]
    pub mounts: Vec<StaticMount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "bool_true")]
    pub enable_logs: bool,
    #[serde(default = "default_environment")]
    pub environment: String,
    #[serde(default = "default_dist_dir")]
    pub dist_dir: PathBuf,
}

fn default_host()        -> String  { "0.0.0.0".to_string() }
fn default_port()        -> u16     { 5173 }
fn bool_true()           -> bool    { true }
fn default_environment() -> String  { "development".to_string() }
fn default_dist_dir()    -> PathBuf { PathBuf::from("./dist") }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enable_logs: bool_true(),
            environment: default_environment(),
            dist_dir: default_dist_dir(),
        }
    }
}

impl ServerConfig {
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Upstream origin that receives `/api` traffic.
    pub origin: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 { 30 }

impl Default for ProxyConfig {
    fn default() -> Self {
        Self { origin: None, timeout_secs: default_timeout_secs() }
    }
}

impl ProxyConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Parsed upstream origin. Errors when unset or not an absolute http(s) URL.
    pub fn origin_url(&self) -> Result<Url> {
        let origin = self.origin.as_deref().ok_or(ConfigError::MissingProxyOrigin)?;
        let url = Url::parse(origin).map_err(|e| ConfigError::InvalidProxyOrigin {
            origin: origin.to_string(),
            reason: e.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::InvalidProxyOrigin {
                origin: origin.to_string(),
                reason: format!("unsupported scheme {other}"),
            }),
        }
    }
}

/// A URL prefix served from a directory below the dist root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticMount {
    pub prefix: String,
    /// Directory relative to `server.dist_dir`.
    pub dir: String,
    /// `Cache-Control` max-age in seconds. `None` sends no cache header.
    #[serde(default)]
    pub max_age: Option<u64>,
}

impl StaticMount {
    pub fn new(prefix: &str, dir: &str, max_age: Option<u64>) -> Self {
        Self { prefix: prefix.to_string(), dir: dir.to_string(), max_age }
    }

    pub fn resolve_dir(&self, dist_dir: &Path) -> PathBuf {
        dist_dir.join(&self.dir)
    }

    fn validate(&self) -> Result<()> {
        if !self.prefix.starts_with('/') || self.prefix.ends_with('/') {
            return Err(ConfigError::InvalidMountPrefix(self.prefix.clone()));
        }
        Ok(())
    }
}

fn default_mounts() -> Vec<StaticMount> {
    vec![
        StaticMount::new("/assets", "assets", Some(ONE_DAY)),
        StaticMount::new("/images", "images", Some(THIRTY_DAYS)),
        StaticMount::new("/logos",  "logos",  Some(THIRTY_DAYS)),
        StaticMount::new("/moksha", "moksha", Some(THIRTY_DAYS)),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            proxy: ProxyConfig::default(),
            mounts: default_mounts(),
        }
    }
}

mod tests;

impl Config {
    /// Load `.env`, the optional config file and the process environment, then validate.
    pub fn load() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!("Loaded environment from {}", path.display());
        }

        let explicit = std::env::var(CONFIG_PATH_ENV).ok().filter(|path| !path.is_empty());
        let path = explicit.clone().unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());

        let mut config = if Path::new(&path).exists() {
            info!("Reading configuration from {path}");
            Self::from_file(Path::new(&path))?
        } else {
            if explicit.is_some() {
                return Err(ConfigError::Io {
                    path,
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "config file not found"),
                });
            }
            Self::default()
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Toml {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Override fields from environment variables read through `lookup`.
    ///
    /// Empty values count as unset, so a blank `.env` entry keeps the default.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(port) = lookup("PROXY_PORT") {
            self.server.port = parse_env("PROXY_PORT", &port)?;
        }
        // Anything except the literal "false" keeps logging on.
        if let Some(flag) = lookup("ENABLE_LOGS") {
            self.server.enable_logs = flag != "false";
        }
        if let Some(env) = lookup("PROXY_ENV") {
            self.server.environment = env;
        }
        if let Some(dist) = lookup("DIST_DIR") {
            self.server.dist_dir = PathBuf::from(dist);
        }
        if let Some(origin) = lookup("PROXY_REDIRECT_ORIGIN") {
            self.proxy.origin = Some(origin);
        }
        if let Some(timeout) = lookup("PROXY_TIMEOUT_SECS") {
            self.proxy.timeout_secs = parse_env("PROXY_TIMEOUT_SECS", &timeout)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.proxy.origin_url()?;
        for mount in &self.mounts {
            mount.validate()?;
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        key: key.to_string(),
        value: value.to_string(),
    })
}
