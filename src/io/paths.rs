use crate::{Result, ShelfError};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory and the config directory
pub const CONFIG_FILE_NAME: &str = "bookshelf.yaml";

/// Snapshot file used when nothing else is configured
pub const DEFAULT_SNAPSHOT_FILE: &str = "app_state.bin";

/// Path management for bookshelf configuration
#[derive(Debug, Clone)]
pub struct ShelfPaths {
    /// Configuration directory holding `bookshelf.yaml`
    pub config_dir: PathBuf,
}

impl ShelfPaths {
    /// Create new paths instance using the platform's standard directories
    pub fn new() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "bookshelf").ok_or_else(|| {
            ShelfError::Config("Failed to determine project directories".to_string())
        })?;

        Ok(Self {
            config_dir: dirs.config_dir().to_path_buf(),
        })
    }

    /// Paths rooted at an explicit directory
    pub fn for_dir(config_dir: &Path) -> Self {
        Self {
            config_dir: config_dir.to_path_buf(),
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_paths() {
        // Some sandboxes have no home directory; only check shape when available
        if let Ok(paths) = ShelfPaths::new() {
            assert!(paths.config_file().ends_with(CONFIG_FILE_NAME));
        }
    }

    #[test]
    fn test_for_dir() {
        let paths = ShelfPaths::for_dir(Path::new("/tmp/shelf"));
        assert_eq!(paths.config_file(), Path::new("/tmp/shelf/bookshelf.yaml"));
    }
}
