use crate::history::DEFAULT_CAPACITY;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Extension that is ignored regardless of user configuration, covering
/// version-control metadata files
pub const VCS_METADATA_EXT: &str = "git";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub history: HistoryConfig,
    pub picker: PickerConfig,
}

/// Opened-files history configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of opened files kept in the history
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Picker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Path substrings to hide from the picker (e.g. "node_modules")
    pub ignore_folders: Vec<String>,
    /// File extensions to hide from the picker; "git" is always ignored
    pub ignore_exts: Vec<String>,
    /// Render the relative path as the item detail instead of description
    pub show_detail: bool,
    /// Maximum number of entries shown in the picker
    pub max_results: usize,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            ignore_folders: Vec::new(),
            ignore_exts: vec![VCS_METADATA_EXT.to_string()],
            show_detail: false,
            max_results: 30,
        }
    }
}

impl PickerConfig {
    /// Effective ignored-extension set. User entries may carry a leading
    /// dot; the version-control entry is present no matter what the user
    /// configured.
    pub fn ignored_extensions(&self) -> HashSet<String> {
        let mut exts: HashSet<String> = self
            .ignore_exts
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_string())
            .collect();
        exts.insert(VCS_METADATA_EXT.to_string());
        exts
    }
}

/// Keys of the host configuration surface that can change at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    IgnoreFolders,
    IgnoreExts,
    ShowDetail,
}

/// Configuration-change notification from the host: which keys changed,
/// plus the new snapshot to copy them from
#[derive(Debug, Clone)]
pub struct ConfigChange {
    pub changed: Vec<ConfigKey>,
    pub snapshot: PickerConfig,
}
