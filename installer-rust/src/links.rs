use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

use crate::{
    error::{InstallError, InstallResult},
    pe,
    shortcuts::{Shell, ShortcutEntry},
};

pub const EXECUTABLE_EXTENSION: &str = "exe";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LinkReport {
    pub created: Vec<PathBuf>,
    pub console: usize,
    pub unreadable: Vec<PathBuf>,
    pub duplicates: Vec<PathBuf>,
}

pub fn is_executable(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(EXECUTABLE_EXTENSION))
}

/// Walks `install_dir` and adds a shortcut to `shortcuts_dir` for every
/// windowed executable. Executables with unreadable headers are skipped with
/// a warning.
///
/// Files are visited before subdirectories, so when two executables share a
/// name the shallower one owns the shortcut and the other is reported in
/// `duplicates`.
pub fn create_links(
    install_dir: &Path,
    shortcuts_dir: &Path,
    shell: &dyn Shell,
) -> InstallResult<LinkReport> {
    log::info!("creating links in {}", shortcuts_dir.display());
    let mut report = LinkReport::default();
    let mut names = HashSet::new();

    let walk = WalkDir::new(install_dir).sort_by(|a, b| {
        a.file_type()
            .is_dir()
            .cmp(&b.file_type().is_dir())
            .then_with(|| a.file_name().cmp(b.file_name()))
    });
    for entry in walk {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(install_dir).to_path_buf();
            InstallError::io(path, err.into())
        })?;
        if !entry.file_type().is_file() || !is_executable(entry.path()) {
            continue;
        }

        let target = entry.path();
        match pe::read_subsystem(target) {
            Ok(subsystem) if subsystem.is_gui() => {
                let Some(shortcut) = ShortcutEntry::for_executable(target) else {
                    log::warn!("skipping {}: no usable shortcut name", target.display());
                    continue;
                };
                // Shortcut names are case-insensitive on the target filesystem.
                if !names.insert(shortcut.name.to_lowercase()) {
                    log::warn!(
                        "skipping {}: a shortcut named {} already exists",
                        target.display(),
                        shortcut.name
                    );
                    report.duplicates.push(target.to_path_buf());
                    continue;
                }
                let lnk = shortcut.create_in(shortcuts_dir, shell)?;
                log::debug!("{} -> {}", lnk.display(), target.display());
                report.created.push(lnk);
            }
            Ok(subsystem) => {
                log::debug!("skipping {} ({subsystem:?})", target.display());
                report.console += 1;
            }
            Err(err) if err.is_header_parse() => {
                log::warn!("skipping {err}");
                report.unreadable.push(target.to_path_buf());
            }
            Err(err) => return Err(err),
        }
    }

    log::info!(
        "created {} shortcuts ({} console programs, {} unreadable, {} duplicate names)",
        report.created.len(),
        report.console,
        report.unreadable.len(),
        report.duplicates.len()
    );
    Ok(report)
}
