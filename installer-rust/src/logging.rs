use anyhow::{Context, Result};
use log::LevelFilter;
use std::{fs, path::Path};

pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Builds the logger without installing it. `RUST_LOG` still applies on top
/// of the verbosity level.
pub fn builder(verbosity: u8, log_file: Option<&Path>) -> Result<env_logger::Builder> {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level_for(verbosity));
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    if let Some(path) = log_file {
        if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        }
        let file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    Ok(builder)
}

pub fn init(verbosity: u8, log_file: Option<&Path>) -> Result<()> {
    builder(verbosity, log_file)?
        .try_init()
        .context("install logger")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(level_for(0), LevelFilter::Info);
        assert_eq!(level_for(1), LevelFilter::Debug);
        assert_eq!(level_for(5), LevelFilter::Trace);
    }

    #[test]
    fn builder_creates_log_file() {
        let tmp = tempfile::tempdir().unwrap();
        let log_path = tmp.path().join("logs").join("installer.log");
        builder(0, Some(&log_path)).unwrap();
        assert!(log_path.exists());
    }
}
