//! URL prefixes bound to directories of the built bundle.

use std::path::{Path, PathBuf};

use axum::http::HeaderValue;
use moksha_config::StaticMount;

use crate::error::{Result, WebError};

#[derive(Debug, Clone)]
pub struct MountPoint {
    pub prefix: String,
    pub dir: PathBuf,
    /// Sent on every hit; `None` leaves the header off.
    pub cache_control: Option<HeaderValue>,
}

impl MountPoint {
    pub fn resolve(mount: &StaticMount, dist_dir: &Path) -> Result<Self> {
        let cache_control = mount
            .max_age
            .map(|age| {
                HeaderValue::from_str(&format!("public,max-age={age}"))
                    .map_err(|_| WebError::InvalidCacheHeader(mount.prefix.clone()))
            })
            .transpose()?;

        Ok(Self {
            prefix: mount.prefix.clone(),
            dir: mount.resolve_dir(dist_dir),
            cache_control,
        })
    }

    /// The path below the prefix, always starting with `/`.
    ///
    /// Matches on segment boundaries: `/assets` covers `/assets` and
    /// `/assets/app.js` but not `/assetsx`.
    pub fn strip<'a>(&self, path: &'a str) -> Option<&'a str> {
        let rest = path.strip_prefix(self.prefix.as_str())?;
        if rest.is_empty() {
            Some("/")
        } else if rest.starts_with('/') {
            Some(rest)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assets() -> MountPoint {
        MountPoint::resolve(
            &StaticMount::new("/assets", "assets", Some(86_400)),
            Path::new("/srv/dist"),
        )
        .unwrap()
    }

    #[test]
    fn test_resolve_joins_dist_dir() {
        let mount = assets();
        assert_eq!(mount.dir, PathBuf::from("/srv/dist/assets"));
        assert_eq!(mount.cache_control.unwrap(), "public,max-age=86400");
    }

    #[test]
    fn test_no_max_age_no_header() {
        let mount = MountPoint::resolve(&StaticMount::new("/docs", "docs", None), Path::new("dist")).unwrap();
        assert!(mount.cache_control.is_none());
    }

    #[test]
    fn test_strip_on_segment_boundary() {
        let mount = assets();
        assert_eq!(mount.strip("/assets/index-3f2a.js"), Some("/index-3f2a.js"));
        assert_eq!(mount.strip("/assets/fonts/a.woff2"), Some("/fonts/a.woff2"));
        assert_eq!(mount.strip("/assets"), Some("/"));
        assert_eq!(mount.strip("/assetsx/a.js"), None);
        assert_eq!(mount.strip("/images/a.png"), None);
    }
}
