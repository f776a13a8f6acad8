//! Command-line surface for the installer.

use clap::{ArgAction, ArgGroup, Parser};
use std::{path::PathBuf, time::Duration};

use crate::config::{
    Action, InstallerConfig, Scope, DEFAULT_CONTENT_TYPE, DEFAULT_GROUP, DEFAULT_TIMEOUT_SECS,
    DEFAULT_URL,
};

/// Downloads the SysInternals Suite, expands it into the appropriate
/// program files location and creates a Start menu entry containing all
/// of the GUI programs.
#[derive(Parser, Debug, Clone)]
#[command(name = "install-sysinternals", version, about)]
#[command(group(ArgGroup::new("scope").required(true).args(["install", "allusers"])))]
pub struct Cli {
    /// Install the application for the current user
    #[arg(short, long)]
    pub install: bool,

    /// Install the application for all users
    #[arg(short, long)]
    pub allusers: bool,

    /// Uninstall the application
    #[arg(short = 'x', long)]
    pub uninstall: bool,

    /// Increase output verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Shortcut group and installation folder name
    #[arg(long, default_value = DEFAULT_GROUP)]
    pub group: String,

    /// Archive to download
    #[arg(long, default_value = DEFAULT_URL)]
    pub url: String,

    /// Substring the response content type must contain
    #[arg(long, default_value = DEFAULT_CONTENT_TYPE)]
    pub content_type: String,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Write log output to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn scope(&self) -> Scope {
        if self.allusers {
            Scope::AllUsers
        } else {
            Scope::CurrentUser
        }
    }

    pub fn action(&self) -> Action {
        if self.uninstall {
            Action::Uninstall
        } else {
            Action::Install
        }
    }

    pub fn into_config(self) -> InstallerConfig {
        let mut config = InstallerConfig::new(self.scope(), self.action());
        config.verbosity = self.verbose;
        config.group = self.group;
        config.url = self.url;
        config.content_type = self.content_type;
        config.timeout = Duration::from_secs(self.timeout);
        config.log_file = self.log_file;
        config
    }
}
