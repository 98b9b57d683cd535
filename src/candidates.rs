use crate::config::PickerConfig;
use std::path::{Path, MAIN_SEPARATOR};
use tracing::trace;

/// Workspace root with a trailing separator, appended unless already
/// present
pub fn normalized_root(root: &str) -> String {
    if root.ends_with(MAIN_SEPARATOR) {
        root.to_string()
    } else {
        format!("{}{}", root, MAIN_SEPARATOR)
    }
}

/// Base name of a path, or the whole path when it has none
pub(crate) fn basename(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}

/// Build the picker's candidate list from the raw history.
///
/// The last history entry is the document being viewed when the command
/// fires and is never offered. Without a workspace root nothing is
/// admitted. The display cap applies in insertion (oldest-first) order,
/// before the name sort, so it keeps the oldest surviving entries.
pub fn build_candidates(
    history: &[String],
    workspace_root: Option<&str>,
    config: &PickerConfig,
) -> Vec<String> {
    let mut recent = history.to_vec();
    recent.pop();

    let root = match workspace_root {
        Some(root) => normalized_root(root),
        None => return Vec::new(),
    };

    let ignored_exts = config.ignored_extensions();

    let mut survivors: Vec<String> = recent
        .into_iter()
        .filter(|path| path.starts_with(&root))
        .filter(|path| {
            !config
                .ignore_folders
                .iter()
                .any(|folder| path.contains(folder.as_str()))
        })
        .filter(|path| {
            Path::new(path)
                .extension()
                .and_then(|ext| ext.to_str())
                .map_or(true, |ext| !ignored_exts.contains(ext))
        })
        .collect();

    survivors.truncate(config.max_results);
    trace!("{} candidate paths after filtering", survivors.len());

    survivors.sort_by(|a, b| {
        basename(a)
            .to_lowercase()
            .cmp(&basename(b).to_lowercase())
            .then_with(|| a.cmp(b))
    });

    survivors
}
