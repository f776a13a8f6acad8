use std::path::{Component, Path, PathBuf};

use crate::{
    config::Scope,
    error::{InstallError, InstallResult},
    shortcuts::{Shell, SpecialFolder},
};

pub const USER_PROGRAM_FILES_VAR: &str = "LOCALAPPDATA";
pub const SYSTEM_PROGRAM_FILES_VAR: &str = "ProgramFiles";

/// Base folders for one scope: where shortcut groups live and where
/// programs get unpacked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemFolders {
    pub programs: PathBuf,
    pub program_files: PathBuf,
}

impl SystemFolders {
    pub fn resolve(scope: Scope, shell: &dyn Shell) -> InstallResult<Self> {
        let (folder, var) = match scope {
            Scope::CurrentUser => (SpecialFolder::Programs, USER_PROGRAM_FILES_VAR),
            Scope::AllUsers => (SpecialFolder::AllUsersPrograms, SYSTEM_PROGRAM_FILES_VAR),
        };
        Ok(Self {
            programs: shell.special_folder(folder)?,
            program_files: env_dir(var)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Targets {
    pub shortcuts: PathBuf,
    pub install: PathBuf,
}

impl Targets {
    pub fn new(folders: &SystemFolders, group: &str) -> InstallResult<Self> {
        validate_group(group)?;
        Ok(Self {
            shortcuts: folders.programs.join(group),
            install: folders.program_files.join(group),
        })
    }
}

fn env_dir(name: &str) -> InstallResult<PathBuf> {
    match std::env::var_os(name) {
        Some(value) if !value.is_empty() => Ok(PathBuf::from(value)),
        _ => Err(InstallError::EnvVar {
            name: name.to_string(),
        }),
    }
}

/// Uninstall removes `base/group` recursively, so the group has to stay a
/// single normal component.
pub fn validate_group(group: &str) -> InstallResult<()> {
    let mut components = Path::new(group).components();
    let valid = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !group.contains(['/', '\\']);
    if valid {
        Ok(())
    } else {
        Err(InstallError::InvalidGroup(group.to_string()))
    }
}
