use std::path::PathBuf;

use crate::{
    archive,
    config::{Action, InstallerConfig},
    error::{InstallError, InstallResult},
    fetch, fs_ops, links,
    paths::{SystemFolders, Targets},
    shortcuts::Shell,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub targets: Targets,
    pub extracted: usize,
    pub shortcuts: Vec<PathBuf>,
    pub unreadable: Vec<PathBuf>,
    pub duplicates: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UninstallReport {
    pub targets: Targets,
    pub removed: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Installed(InstallReport),
    Uninstalled(UninstallReport),
}

pub fn run(config: &InstallerConfig, folders: &SystemFolders, shell: &dyn Shell) -> InstallResult<Outcome> {
    let targets = Targets::new(folders, &config.group)?;
    match config.action {
        Action::Install => install(config, targets, shell).map(Outcome::Installed),
        Action::Uninstall => uninstall(targets).map(Outcome::Uninstalled),
    }
}

pub fn install(config: &InstallerConfig, targets: Targets, shell: &dyn Shell) -> InstallResult<InstallReport> {
    let payload = fetch::fetch_archive(&config.url, &config.content_type, config.timeout)?;

    log::info!("creating subdirectories");
    let created = prepare_dirs(&targets)?;

    let result = (|| -> InstallResult<InstallReport> {
        let extracted = archive::extract_zip(&payload, &targets.install)?;
        let link_report = links::create_links(&targets.install, &targets.shortcuts, shell)?;
        Ok(InstallReport {
            targets: targets.clone(),
            extracted,
            shortcuts: link_report.created,
            unreadable: link_report.unreadable,
            duplicates: link_report.duplicates,
        })
    })();

    if let Err(err) = &result {
        log::error!("install failed: {err}");
        roll_back(&created);
    }
    result
}

pub fn uninstall(targets: Targets) -> InstallResult<UninstallReport> {
    log::info!("removing subdirectories");
    let mut removed = Vec::new();
    for dir in [&targets.shortcuts, &targets.install] {
        if fs_ops::remove_dir_if_present(dir)? {
            log::debug!("removed {}", dir.display());
            removed.push(dir.clone());
        } else {
            log::debug!("{} not present", dir.display());
        }
    }
    Ok(UninstallReport { targets, removed })
}

/// Creates both target directories. Returns the ones this call created.
fn prepare_dirs(targets: &Targets) -> InstallResult<Vec<PathBuf>> {
    let mut created = Vec::new();
    for dir in [&targets.shortcuts, &targets.install] {
        let base = dir.parent().unwrap_or(dir);
        if !base.is_dir() {
            roll_back(&created);
            return Err(InstallError::MissingFolder(base.to_path_buf()));
        }
        match fs_ops::ensure_dir(dir) {
            Ok(true) => created.push(dir.clone()),
            Ok(false) => log::debug!("{} already exists", dir.display()),
            Err(err) => {
                roll_back(&created);
                return Err(err);
            }
        }
    }
    Ok(created)
}

fn roll_back(created: &[PathBuf]) {
    for dir in created {
        log::warn!("removing {}", dir.display());
        if let Err(err) = fs_ops::remove_dir_if_present(dir) {
            log::warn!("rollback of {} failed: {err}", dir.display());
        }
    }
}
