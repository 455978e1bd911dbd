//! Build metadata written next to the bundle by the post-build step.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// File name of the build record inside the dist directory.
pub const BUILD_INFO_FILE: &str = "build-info.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
    /// RFC 3339 UTC timestamp with millisecond precision.
    pub build_time: String,
    pub environment: String,
    pub version: String,
}

impl BuildInfo {
    pub fn new(environment: impl Into<String>, version: impl Into<String>) -> Self {
        Self::at(Utc::now(), environment, version)
    }

    pub fn at(
        time: DateTime<Utc>,
        environment: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            build_time: time.to_rfc3339_opts(SecondsFormat::Millis, true),
            environment: environment.into(),
            version: version.into(),
        }
    }

    /// Pretty-printed with two-space indentation.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_to(&self, dir: &Path) -> Result<()> {
        std::fs::write(dir.join(BUILD_INFO_FILE), self.to_json()?)?;
        Ok(())
    }

    /// Reads the record from a dist directory, `None` if the file does not exist.
    pub fn read_from(dir: &Path) -> Result<Option<Self>> {
        let path = dir.join(BUILD_INFO_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }
}
