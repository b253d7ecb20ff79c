use crate::io::paths::DEFAULT_SNAPSHOT_FILE;
use crate::notify::NotificationDispatcher;
use crate::{Result, ShelfError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration, read from `bookshelf.yaml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShelfConfig {
    /// Where the snapshot is written and read
    pub snapshot_path: PathBuf,

    /// Save the snapshot when the interactive shell exits
    pub autosave_on_exit: bool,

    /// Restore the snapshot when a session starts
    pub load_on_start: bool,

    pub notifications: NotificationSettings,
}

impl Default for ShelfConfig {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_FILE),
            autosave_on_exit: true,
            load_on_start: true,
            notifications: NotificationSettings::default(),
        }
    }
}

impl ShelfConfig {
    pub fn validate(&self) -> Result<()> {
        if self.snapshot_path.as_os_str().is_empty() {
            return Err(ShelfError::Config(
                "snapshot_path must not be empty".to_string(),
            ));
        }
        if self.notifications.max_in_flight == 0 {
            return Err(ShelfError::Config(
                "notifications.max_in_flight must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Simulated author notifications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotificationSettings {
    /// Simulated delivery delay in milliseconds
    pub latency_ms: u64,

    /// Cap on notices waiting for delivery; extra notices are dropped
    pub max_in_flight: usize,

    /// How long to wait for pending notices when the program exits
    pub shutdown_grace_ms: u64,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            latency_ms: 2000,
            max_in_flight: 64,
            shutdown_grace_ms: 2500,
        }
    }
}

impl NotificationSettings {
    pub fn dispatcher(&self) -> NotificationDispatcher {
        NotificationDispatcher::new(Duration::from_millis(self.latency_ms), self.max_in_flight)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms)
    }
}
