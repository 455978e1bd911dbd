//! moksha-postbuild — Runs after the site bundle is built.
//!
//! Copies the server executable into the dist directory so the directory is
//! self-contained, and writes `build-info.json` with the build time,
//! environment and version. Both steps always run; any failure is reported
//! and makes the command exit non-zero.

use std::path::{Path, PathBuf};

use clap::Parser;
use moksha_common::{BuildInfo, CommonError, BUILD_INFO_FILE};
use thiserror::Error;
use tracing::{error, info};

const SERVER_BIN: &str = "moksha-web";

#[derive(Debug, Clone, Parser)]
#[command(name = "moksha-postbuild", version, about = "Stage the server next to the built site")]
pub struct Args {
    /// Build output directory.
    #[arg(long, default_value = "dist")]
    pub dist: PathBuf,

    /// Server executable to copy. Defaults to `moksha-web` next to this binary.
    #[arg(long)]
    pub server: Option<PathBuf>,

    #[arg(long, env = "BUILD_ENV", default_value = "development")]
    pub environment: String,

    #[arg(long, env = "PACKAGE_VERSION", default_value = "unknown")]
    pub package_version: String,
}

#[derive(Debug, Error)]
pub enum PostbuildError {
    #[error("Cannot locate the server executable: {0}")]
    ServerPath(#[source] std::io::Error),

    #[error("Server path {0} has no file name")]
    NoFileName(PathBuf),

    #[error("Error copying {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error creating build-info.json: {0}")]
    BuildInfo(#[from] CommonError),
}

#[derive(Debug, Default)]
pub struct Report {
    pub copied_to: Option<PathBuf>,
    pub build_info: Option<BuildInfo>,
    pub errors: Vec<PostbuildError>,
}

pub fn run(args: &Args) -> Report {
    let build = BuildInfo::new(&args.environment, &args.package_version);
    info!("[{}] Starting post-build process...", build.build_time);

    let mut report = Report::default();

    match copy_server(args) {
        Ok(dest) => {
            info!("Successfully copied server to {}", dest.display());
            report.copied_to = Some(dest);
        }
        Err(e) => {
            error!("{e}");
            report.errors.push(e);
        }
    }

    match build.write_to(&args.dist) {
        Ok(()) => {
            info!("Successfully created {BUILD_INFO_FILE}");
            report.build_info = Some(build);
        }
        Err(e) => {
            let e = PostbuildError::from(e);
            error!("{e}");
            report.errors.push(e);
        }
    }

    if report.errors.is_empty() {
        info!("Post-build process completed successfully");
    }
    report
}

fn copy_server(args: &Args) -> Result<PathBuf, PostbuildError> {
    let from = match &args.server {
        Some(path) => path.clone(),
        None => default_server_path()?,
    };
    let name = from
        .file_name()
        .ok_or_else(|| PostbuildError::NoFileName(from.clone()))?;
    let to = args.dist.join(name);

    std::fs::copy(&from, &to).map_err(|source| PostbuildError::Copy {
        from: from.clone(),
        to: to.clone(),
        source,
    })?;
    Ok(to)
}

fn default_server_path() -> Result<PathBuf, PostbuildError> {
    let exe = std::env::current_exe().map_err(PostbuildError::ServerPath)?;
    Ok(sibling_server(&exe))
}

fn sibling_server(exe: &Path) -> PathBuf {
    exe.with_file_name(format!("{SERVER_BIN}{}", std::env::consts::EXE_SUFFIX))
}
