//! Post-build step: stage the server binary in dist and record build metadata.

use clap::Parser;
use moksha_common::logging::{init_tracing, LogFormat};
use moksha_postbuild::{run, Args};

fn main() -> anyhow::Result<()> {
    init_tracing(LogFormat::Compact)?;

    let args = Args::parse();
    let report = run(&args);

    if !report.errors.is_empty() {
        anyhow::bail!("Post-build process failed with {} error(s)", report.errors.len());
    }
    Ok(())
}
