//! File locations for the catalog database and logs.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".course-catalog";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "catalog.sqlite";
/// Log folder inside the application data directory.
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    data_dir: PathBuf,
}

impl Settings {
    /// Use `data_dir` when given (CLI flag or environment), otherwise fall
    /// back to `~/.course-catalog`.
    pub fn resolve(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR_NAME)
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_dir_wins() {
        let settings = Settings::resolve(Some(PathBuf::from("/tmp/catalog"))).unwrap();
        assert_eq!(settings.data_dir(), Path::new("/tmp/catalog"));
        assert_eq!(settings.db_path(), Path::new("/tmp/catalog/catalog.sqlite"));
        assert_eq!(settings.log_dir(), Path::new("/tmp/catalog/logs"));
    }
}
