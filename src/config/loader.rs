use super::types::ShelfConfig;
use crate::io::paths::{ShelfPaths, CONFIG_FILE_NAME};
use crate::{Result, ShelfError};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Finds and reads `bookshelf.yaml`.
///
/// An explicit path wins and must exist. Otherwise the search paths are tried
/// in order (working directory first, then the platform config directory),
/// and defaults are used when none of them holds a file.
pub struct ConfigLoader {
    explicit: Option<PathBuf>,
    search_paths: Vec<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        let mut search_paths = Vec::new();
        if let Ok(current_dir) = std::env::current_dir() {
            search_paths.push(current_dir.join(CONFIG_FILE_NAME));
        }
        if let Ok(paths) = ShelfPaths::new() {
            search_paths.push(paths.config_file());
        }
        Self {
            explicit: None,
            search_paths,
        }
    }

    /// Replace the discovery locations
    pub fn with_search_paths(mut self, search_paths: Vec<PathBuf>) -> Self {
        self.search_paths = search_paths;
        self
    }

    pub fn with_explicit_path(mut self, path: Option<PathBuf>) -> Self {
        self.explicit = path;
        self
    }

    pub fn load(&self) -> Result<ShelfConfig> {
        if let Some(path) = &self.explicit {
            return Self::load_file(path);
        }

        for candidate in &self.search_paths {
            if candidate.is_file() {
                return Self::load_file(candidate);
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(ShelfConfig::default())
    }

    pub fn load_file(path: &Path) -> Result<ShelfConfig> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ShelfError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: ShelfConfig = serde_yaml_ng::from_str(&contents).map_err(|e| {
            ShelfError::Config(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;

        info!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
