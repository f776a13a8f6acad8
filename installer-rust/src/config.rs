use std::{path::PathBuf, time::Duration};

pub const DEFAULT_GROUP: &str = "SysInternals";
pub const DEFAULT_URL: &str = "https://download.sysinternals.com/files/SysinternalsSuite.zip";
pub const DEFAULT_CONTENT_TYPE: &str = "zip";
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    CurrentUser,
    AllUsers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Install,
    Uninstall,
}

/// Everything one run needs, fixed before the first side effect.
#[derive(Debug, Clone)]
pub struct InstallerConfig {
    pub scope: Scope,
    pub action: Action,
    pub verbosity: u8,
    pub group: String,
    pub url: String,
    pub content_type: String,
    pub timeout: Duration,
    pub log_file: Option<PathBuf>,
}

impl InstallerConfig {
    pub fn new(scope: Scope, action: Action) -> Self {
        Self {
            scope,
            action,
            verbosity: 0,
            group: DEFAULT_GROUP.to_string(),
            url: DEFAULT_URL.to_string(),
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_file: None,
        }
    }
}
