mod archive;
mod cli;
mod config;
mod error;
mod fetch;
mod fs_ops;
mod installer;
mod links;
mod logging;
mod paths;
mod pe;
mod shortcuts;

use anyhow::{Context, Result};
use clap::Parser;

fn main() -> Result<()> {
    let config = cli::Cli::parse().into_config();
    logging::init(config.verbosity, config.log_file.as_deref())?;
    log::debug!("{config:?}");

    let shell = shortcuts::WshShell;
    let folders = paths::SystemFolders::resolve(config.scope, &shell)
        .context("resolve system folders")?;

    match installer::run(&config, &folders, &shell)? {
        installer::Outcome::Installed(report) => {
            log::info!(
                "installed {} files into {}, {} shortcuts in {}",
                report.extracted,
                report.targets.install.display(),
                report.shortcuts.len(),
                report.targets.shortcuts.display()
            );
            if !report.unreadable.is_empty() {
                log::warn!("{} executables could not be classified", report.unreadable.len());
            }
            if !report.duplicates.is_empty() {
                log::warn!("{} executables share a name with an earlier shortcut", report.duplicates.len());
            }
        }
        installer::Outcome::Uninstalled(report) => {
            if report.removed.is_empty() {
                log::info!("nothing to remove at {}", report.targets.install.display());
            } else {
                log::info!("removed {} directories", report.removed.len());
            }
        }
    }
    Ok(())
}
