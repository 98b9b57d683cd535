use anyhow::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt::Debug;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Error surfaced by the host when a document cannot be opened
#[derive(Debug, Error)]
pub enum HostError {
    #[error("{0}")]
    OpenFailed(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Key-value store the host persists across sessions
pub trait StateStore: Debug {
    /// Read the value stored under `key`, if any
    fn read(&self, key: &str) -> Option<Value>;

    /// Write `value` under `key`
    fn write(&mut self, key: &str, value: Value) -> Result<()>;
}

/// Host surface the picker talks back to
pub trait HostShell {
    /// Ask the host to open a document by absolute path
    fn open_document(&mut self, path: &str) -> Result<(), HostError>;

    /// Informational notice, non-error
    fn show_info(&mut self, message: &str);

    /// Error notice
    fn show_error(&mut self, message: &str);
}

/// In-memory store for tests and hosts that bring their own persistence
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    values: HashMap<String, Value>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStateStore {
    fn read(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: Value) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// File-backed store holding a single JSON object, one entry per key
#[derive(Debug)]
pub struct JsonFileStateStore {
    path: PathBuf,
    values: HashMap<String, Value>,
}

impl JsonFileStateStore {
    /// Load from the default data path. A missing file starts empty.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::default_path())
    }

    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            debug!("State file not found at {:?}, starting empty", path);
            return Ok(Self {
                path,
                values: HashMap::new(),
            });
        }

        let data = fs::read(&path)?;
        let values: HashMap<String, Value> = serde_json::from_slice(&data)?;
        debug!("Loaded {} state entries from {:?}", values.len(), path);
        Ok(Self { path, values })
    }

    /// Save all entries to disk. Creates directories if needed.
    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_vec_pretty(&self.values)?;
        fs::write(&self.path, json)?;
        debug!("State saved to {:?}", self.path);
        Ok(())
    }

    fn default_path() -> PathBuf {
        let data_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("/tmp"));
        data_dir.join("recently-files").join("state.json")
    }
}

impl StateStore for JsonFileStateStore {
    fn read(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: Value) -> Result<()> {
        self.values.insert(key.to_string(), value);
        self.save()
    }
}
