use std::path::PathBuf;
use thiserror::Error;

/// Error type shared by every installer stage.
#[derive(Debug, Error)]
pub enum InstallError {
    // download
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("download failed for {url}: HTTP {status}")]
    DownloadFailed { url: String, status: u16 },

    #[error("unexpected content type for {url}: expected {expected:?}, got {actual:?}")]
    UnexpectedContentType {
        url: String,
        expected: String,
        actual: String,
    },

    // archive
    #[error("invalid archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("archive entry escapes the install directory: {0}")]
    UnsafeEntry(String),

    // filesystem
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("base folder does not exist: {0:?}")]
    MissingFolder(PathBuf),

    #[error("environment variable {name} is not set")]
    EnvVar { name: String },

    #[error("invalid group name {0:?}: must be a single folder name")]
    InvalidGroup(String),

    // executable headers
    #[error("cannot read PE header of {path:?}: {reason}")]
    HeaderParse { path: PathBuf, reason: String },

    // shell automation
    #[error("shell automation failed: {0}")]
    Shell(String),
}

pub type InstallResult<T> = Result<T, InstallError>;

impl InstallError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        InstallError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn header(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        InstallError::HeaderParse {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Download and filesystem problems abort a run; header problems only skip one file.
    pub fn is_header_parse(&self) -> bool {
        matches!(self, InstallError::HeaderParse { .. })
    }
}
