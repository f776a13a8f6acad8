use std::{
    fs, io,
    path::{Component, Path, PathBuf},
};

use crate::error::{InstallError, InstallResult};

/// Unpacks a zip held in memory into `dest_root`, keeping relative paths.
/// Returns the number of files written.
pub fn extract_zip(payload: &[u8], dest_root: &Path) -> InstallResult<usize> {
    log::info!("extracting programs into {}", dest_root.display());
    let reader = io::Cursor::new(payload);
    let mut zip = zip::ZipArchive::new(reader)?;

    // Vet every name before the first write.
    for name in zip.file_names() {
        entry_path(name)?;
    }

    let mut written = 0;
    for i in 0..zip.len() {
        let mut entry = zip.by_index(i)?;
        let Some(rel) = entry_path(entry.name())? else {
            log::trace!("skipping {:?}: names the destination itself", entry.name());
            continue;
        };
        let out_path = dest_root.join(&rel);

        if entry.is_dir() {
            fs::create_dir_all(&out_path).map_err(|err| InstallError::io(&out_path, err))?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent).map_err(|err| InstallError::io(parent, err))?;
        }
        let mut out_file =
            fs::File::create(&out_path).map_err(|err| InstallError::io(&out_path, err))?;
        io::copy(&mut entry, &mut out_file).map_err(|err| InstallError::io(&out_path, err))?;
        log::trace!("extracted {}", rel.display());
        written += 1;
    }
    log::debug!("extracted {written} files");
    Ok(written)
}

/// Relative path for an entry name. Absolute paths, drive prefixes and any
/// `..` component are refused so nothing lands outside the destination.
/// A directory entry such as `./` names the destination itself and yields
/// `None`.
fn entry_path(name: &str) -> InstallResult<Option<PathBuf>> {
    let normalized = name.replace('\\', "/");
    let path = Path::new(&normalized);
    if path.is_absolute()
        || path.has_root()
        || path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_) | Component::RootDir))
        || looks_like_drive(&normalized)
    {
        return Err(InstallError::UnsafeEntry(name.to_string()));
    }

    let rel: PathBuf = path
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect();
    if rel.as_os_str().is_empty() {
        if normalized.ends_with('/') {
            return Ok(None);
        }
        return Err(InstallError::UnsafeEntry(name.to_string()));
    }
    Ok(Some(rel))
}

// `C:foo` is not a prefix on non-Windows hosts but is one where it matters.
fn looks_like_drive(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}
