use std::{
    path::{Path, PathBuf},
    process::Command,
};

use crate::error::{InstallError, InstallResult};

pub const SHORTCUT_EXTENSION: &str = "lnk";

// Redirected PowerShell output uses the OEM code page unless told otherwise.
const UTF8_OUTPUT: &str = "[Console]::OutputEncoding = [System.Text.Encoding]::UTF8; ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialFolder {
    Programs,
    AllUsersPrograms,
}

impl SpecialFolder {
    pub fn as_str(self) -> &'static str {
        match self {
            SpecialFolder::Programs => "Programs",
            SpecialFolder::AllUsersPrograms => "AllUsersPrograms",
        }
    }
}

/// Shell automation the installer depends on. Passed explicitly to the
/// stages that need it.
pub trait Shell {
    fn special_folder(&self, folder: SpecialFolder) -> InstallResult<PathBuf>;
    fn create_shortcut(&self, lnk_path: &Path, target: &Path) -> InstallResult<()>;
}

/// WScript.Shell driven through PowerShell.
#[derive(Debug, Default, Clone, Copy)]
pub struct WshShell;

impl WshShell {
    fn run(&self, script: &str) -> InstallResult<String> {
        let output = Command::new("powershell")
            .arg("-NoProfile")
            .arg("-NonInteractive")
            .arg("-Command")
            .arg(script)
            .output()
            .map_err(|err| InstallError::Shell(format!("run powershell: {err}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(InstallError::Shell(format!(
                "powershell exited with {:?}: {}",
                output.status.code(),
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Shell for WshShell {
    fn special_folder(&self, folder: SpecialFolder) -> InstallResult<PathBuf> {
        let out = self.run(&special_folder_script(folder))?;
        if out.is_empty() {
            return Err(InstallError::Shell(format!(
                "special folder {} is not available",
                folder.as_str()
            )));
        }
        Ok(PathBuf::from(out))
    }

    fn create_shortcut(&self, lnk_path: &Path, target: &Path) -> InstallResult<()> {
        let lnk = ps_quote(&lnk_path.display().to_string());
        let tgt = ps_quote(&target.display().to_string());
        let script = format!(
            "$WshShell = New-Object -ComObject WScript.Shell; \
             $Shortcut = $WshShell.CreateShortcut({lnk}); \
             $Shortcut.TargetPath = {tgt}; \
             $Shortcut.Save();"
        );
        self.run(&script)?;
        Ok(())
    }
}

/// A shortcut derived from one executable: `dir/tool.exe` becomes `tool`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutEntry {
    pub name: String,
    pub target: PathBuf,
}

impl ShortcutEntry {
    pub fn for_executable(target: &Path) -> Option<Self> {
        let name = target.file_stem()?.to_str()?;
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            target: target.to_path_buf(),
        })
    }

    pub fn create_in(&self, shortcuts_dir: &Path, shell: &dyn Shell) -> InstallResult<PathBuf> {
        let lnk_path = shortcut_path(shortcuts_dir, &self.name)?;
        shell.create_shortcut(&lnk_path, &self.target)?;
        Ok(lnk_path)
    }
}

pub fn shortcut_path(shortcuts_dir: &Path, name: &str) -> InstallResult<PathBuf> {
    if name.is_empty() {
        return Err(InstallError::Shell("shortcut name is empty".to_string()));
    }
    Ok(shortcuts_dir.join(format!("{name}.{SHORTCUT_EXTENSION}")))
}

fn special_folder_script(folder: SpecialFolder) -> String {
    let name = ps_quote(folder.as_str());
    format!(
        "{UTF8_OUTPUT}\
         $WshShell = New-Object -ComObject WScript.Shell; \
         $WshShell.SpecialFolders({name})"
    )
}

fn ps_quote(value: &str) -> String {
    let escaped = value.replace('\'', "''");
    format!("'{}'", escaped)
}

/// Shell stand-in for tests: special folders map to fixed directories and
/// shortcuts are plain files holding the target path.
#[cfg(test)]
pub struct FileShell {
    pub programs: PathBuf,
    pub all_users_programs: PathBuf,
}

#[cfg(test)]
impl FileShell {
    pub fn new(root: &Path) -> Self {
        Self {
            programs: root.join("user-programs"),
            all_users_programs: root.join("common-programs"),
        }
    }
}

#[cfg(test)]
impl Shell for FileShell {
    fn special_folder(&self, folder: SpecialFolder) -> InstallResult<PathBuf> {
        Ok(match folder {
            SpecialFolder::Programs => self.programs.clone(),
            SpecialFolder::AllUsersPrograms => self.all_users_programs.clone(),
        })
    }

    fn create_shortcut(&self, lnk_path: &Path, target: &Path) -> InstallResult<()> {
        std::fs::write(lnk_path, target.display().to_string())
            .map_err(|err| InstallError::io(lnk_path, err))
    }
}
