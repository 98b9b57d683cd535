use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Registry key of the generic fallback icon file
pub const GENERIC_ICON_KEY: &str = "file";

const ICON_SUFFIX: &str = "svg";

/// Light/dark icon paths for one picker row, resolved independently
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IconPair {
    pub light: Option<PathBuf>,
    pub dark: Option<PathBuf>,
}

/// Extension to icon-file lookup, built once at startup from the two
/// theme directories
#[derive(Debug, Default)]
pub struct IconRegistry {
    light: HashMap<String, PathBuf>,
    dark: HashMap<String, PathBuf>,
}

impl IconRegistry {
    /// Empty registry; every resolution yields no icons
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(light_dir: &Path, dark_dir: &Path) -> Self {
        Self {
            light: load_icon_dir(light_dir),
            dark: load_icon_dir(dark_dir),
        }
    }

    /// Resolve icons for a file extension, falling back to the generic
    /// "file" icon per theme, then to no icon at all
    pub fn resolve(&self, extension: Option<&str>) -> IconPair {
        IconPair {
            light: resolve_in(&self.light, extension),
            dark: resolve_in(&self.dark, extension),
        }
    }

    pub fn len(&self) -> usize {
        self.light.len() + self.dark.len()
    }

    pub fn is_empty(&self) -> bool {
        self.light.is_empty() && self.dark.is_empty()
    }
}

fn resolve_in(icons: &HashMap<String, PathBuf>, extension: Option<&str>) -> Option<PathBuf> {
    extension
        .and_then(|ext| icons.get(ext))
        .or_else(|| icons.get(GENERIC_ICON_KEY))
        .cloned()
}

/// Read one theme directory. A missing directory is logged and yields an
/// empty mapping; the picker keeps working without icons.
fn load_icon_dir(dir: &Path) -> HashMap<String, PathBuf> {
    let mut icons = HashMap::new();

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Icon directory {:?} unavailable: {}", dir, e);
            return icons;
        }
    };

    for entry in entries.filter_map(|e| e.ok()) {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) != Some(ICON_SUFFIX) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            icons.insert(stem.to_string(), path.clone());
        }
    }

    debug!("Loaded {} icons from {:?}", icons.len(), dir);
    icons
}
