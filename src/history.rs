use crate::host::StateStore;
use serde_json::Value;
use tracing::{debug, error};

/// Key under which the opened-files list is persisted in the host store
pub const OPENED_FILES_KEY: &str = "openedFiles";

/// Default ceiling for the opened-files history
pub const DEFAULT_CAPACITY: usize = 500;

/// Bounded, deduplicated list of opened file paths in insertion order,
/// oldest first. Reaching the capacity evicts exactly one entry, the
/// oldest. Every mutation is written through to the host store.
#[derive(Debug)]
pub struct HistoryStore {
    entries: Vec<String>,
    capacity: usize,
    store: Box<dyn StateStore>,
}

impl HistoryStore {
    /// Load the persisted history. An absent or malformed payload starts
    /// the history empty.
    pub fn load(store: Box<dyn StateStore>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut entries: Vec<String> = store
            .read(OPENED_FILES_KEY)
            .and_then(|value| serde_json::from_value(value).ok())
            .unwrap_or_default();

        // A payload written under a larger ceiling is trimmed oldest-first
        // so the bound holds from the start.
        if entries.len() >= capacity {
            let excess = entries.len() + 1 - capacity;
            entries.drain(..excess);
            debug!(
                "Trimmed {} oldest history entries to fit capacity {}",
                excess, capacity
            );
        }

        debug!("Loaded {} opened-file entries", entries.len());
        Self {
            entries,
            capacity,
            store,
        }
    }

    /// Record a document open. Re-opening a known path is a no-op; the
    /// entry keeps its original position.
    pub fn record_open(&mut self, path: &str) {
        if self.entries.iter().any(|p| p == path) {
            return;
        }

        self.entries.push(path.to_string());
        if self.entries.len() >= self.capacity {
            let evicted = self.entries.remove(0);
            debug!("History at capacity, evicted oldest entry {}", evicted);
        }

        self.persist();
    }

    /// Full ordered history, oldest first. Callers get their own copy.
    pub fn list_all(&self) -> Vec<String> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Write-through to the host store. Failures are logged, not raised;
    /// the in-memory list stays authoritative for this session.
    fn persist(&mut self) {
        let payload = Value::from(self.entries.clone());
        if let Err(e) = self.store.write(OPENED_FILES_KEY, payload) {
            error!("Failed to save opened-files history: {}", e);
        }
    }
}
