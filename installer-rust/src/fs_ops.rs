use std::{fs, io, path::Path, time::Duration};

use crate::error::{InstallError, InstallResult};

const REMOVE_ATTEMPTS: usize = 4;

fn retry<F>(mut op: F, attempts: usize) -> io::Result<()>
where
    F: FnMut() -> io::Result<()>,
{
    let mut delay = Duration::from_millis(200);
    for i in 0..attempts {
        match op() {
            Ok(()) => return Ok(()),
            Err(err) => {
                if i + 1 == attempts {
                    return Err(err);
                }
                log::debug!("attempt {} failed: {err}, retrying in {delay:?}", i + 1);
            }
        }
        std::thread::sleep(delay);
        delay = std::cmp::min(delay * 2, Duration::from_secs(2));
    }
    Ok(())
}

/// Creates `path` if needed. Returns `true` when this call created it.
pub fn ensure_dir(path: &Path) -> InstallResult<bool> {
    if path.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(path).map_err(|err| InstallError::io(path, err))?;
    Ok(true)
}

/// Removes `path` and everything under it. Returns `true` when something
/// was removed; a missing directory is not an error.
pub fn remove_dir_if_present(path: &Path) -> InstallResult<bool> {
    if !path.exists() {
        return Ok(false);
    }
    retry(
        || match fs::remove_dir_all(path) {
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        },
        REMOVE_ATTEMPTS,
    )
    .map_err(|err| InstallError::io(path, err))?;
    Ok(true)
}
