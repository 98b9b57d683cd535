use crate::candidates::build_candidates;
use crate::config::{Config, ConfigChange, ConfigKey};
use crate::favorites::FavoritesStore;
use crate::history::HistoryStore;
use crate::host::{HostShell, StateStore};
use crate::icons::IconRegistry;
use crate::picker::{Picker, PickerEffect, PickerEvent, PickerItem};
use tracing::{debug, info};

/// Notice shown when there is nothing to pick from
pub const NO_RECENT_FILES_NOTICE: &str = "No recently files";

/// Result of invoking the open-recent command
#[derive(Debug)]
pub enum PickerLaunch {
    /// Nothing to show; the host displays this informational notice
    Notice(&'static str),
    /// Picker ready to display with its initial rows
    Show {
        picker: Picker,
        items: Vec<PickerItem>,
    },
}

/// Per-process state: history, favorites, icons, and the active
/// configuration snapshot. Constructed once and handed to the host
/// adapter; all event handlers live here.
#[derive(Debug)]
pub struct Session {
    history: HistoryStore,
    favorites: FavoritesStore,
    icons: IconRegistry,
    config: Config,
}

impl Session {
    pub fn new(store: Box<dyn StateStore>, icons: IconRegistry, config: Config) -> Self {
        let history = HistoryStore::load(store, config.history.capacity);
        info!("Session started with {} known opened files", history.len());

        Self {
            history,
            favorites: FavoritesStore::new(),
            icons,
            config,
        }
    }

    /// Document-open notification from the host
    pub fn handle_document_opened(&mut self, path: &str) {
        self.history.record_open(path);
    }

    /// Configuration-change notification: copy over only the keys the
    /// host reports as changed
    pub fn handle_config_changed(&mut self, change: &ConfigChange) {
        for key in &change.changed {
            match key {
                ConfigKey::IgnoreFolders => {
                    self.config.picker.ignore_folders = change.snapshot.ignore_folders.clone();
                }
                ConfigKey::IgnoreExts => {
                    self.config.picker.ignore_exts = change.snapshot.ignore_exts.clone();
                }
                ConfigKey::ShowDetail => {
                    self.config.picker.show_detail = change.snapshot.show_detail;
                }
            }
        }
        debug!("Applied config change for {:?}", change.changed);
    }

    /// The open-recent command. Yields either an informational notice or
    /// a picker with its initial rows.
    pub fn open_picker(&self, workspace_root: Option<&str>) -> PickerLaunch {
        let history = self.history.list_all();
        if history.len() <= 1 {
            return PickerLaunch::Notice(NO_RECENT_FILES_NOTICE);
        }

        let candidates = build_candidates(&history, workspace_root, &self.config.picker);
        if candidates.is_empty() {
            return PickerLaunch::Notice(NO_RECENT_FILES_NOTICE);
        }

        // Candidates survived the workspace filter, so a root is present
        let root = workspace_root.unwrap_or_default();
        let mut picker = Picker::new(root, self.config.picker.show_detail, candidates);
        let items = picker.render(&self.favorites, &self.icons);

        PickerLaunch::Show { picker, items }
    }

    /// Drive an open picker with a host event
    pub fn picker_event(&mut self, picker: &mut Picker, event: PickerEvent) -> PickerEffect {
        picker.handle_event(event, &mut self.favorites, &self.icons)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

/// Ask the host to open `path`; failure surfaces as an error notice. The
/// picker is already gone by the time this runs, so there is no retry
/// path.
pub fn dispatch_open(host: &mut dyn HostShell, path: &str) {
    if let Err(e) = host.open_document(path) {
        host.show_error(&format!("Failed to open document: {}", e));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PickerConfig;
    use crate::host::{HostError, MemoryStateStore};

    fn session() -> Session {
        Session::new(
            Box::new(MemoryStateStore::new()),
            IconRegistry::new(),
            Config::default(),
        )
    }

    #[derive(Debug, Default)]
    struct RecordingHost {
        opened: Vec<String>,
        errors: Vec<String>,
        fail_open: bool,
    }

    impl HostShell for RecordingHost {
        fn open_document(&mut self, path: &str) -> Result<(), HostError> {
            if self.fail_open {
                return Err(HostError::OpenFailed(format!("no such document: {}", path)));
            }
            self.opened.push(path.to_string());
            Ok(())
        }

        fn show_info(&mut self, _message: &str) {}

        fn show_error(&mut self, message: &str) {
            self.errors.push(message.to_string());
        }
    }

    #[test]
    fn test_single_entry_yields_notice() {
        let mut session = session();
        session.handle_document_opened("/w/a.ts");

        match session.open_picker(Some("/w")) {
            PickerLaunch::Notice(msg) => assert_eq!(msg, NO_RECENT_FILES_NOTICE),
            PickerLaunch::Show { .. } => panic!("expected notice"),
        }
    }

    #[test]
    fn test_no_workspace_yields_notice() {
        let mut session = session();
        session.handle_document_opened("/w/a.ts");
        session.handle_document_opened("/w/b.ts");

        match session.open_picker(None) {
            PickerLaunch::Notice(msg) => assert_eq!(msg, NO_RECENT_FILES_NOTICE),
            PickerLaunch::Show { .. } => panic!("expected notice"),
        }
    }

    #[test]
    fn test_single_candidate_is_still_shown() {
        let mut session = session();
        session.handle_document_opened("/w/a.ts");
        session.handle_document_opened("/w/b.ts");

        match session.open_picker(Some("/w")) {
            PickerLaunch::Show { items, .. } => {
                assert_eq!(items.len(), 1);
                assert_eq!(items[0].label, "a.ts");
            }
            PickerLaunch::Notice(_) => panic!("expected picker"),
        }
    }

    #[test]
    fn test_config_change_applies_only_named_keys() {
        let mut session = session();

        let change = ConfigChange {
            changed: vec![ConfigKey::ShowDetail],
            snapshot: PickerConfig {
                show_detail: true,
                ignore_folders: vec!["dist".to_string()],
                ..PickerConfig::default()
            },
        };
        session.handle_config_changed(&change);

        assert!(session.config().picker.show_detail);
        // ignore_folders was not in the changed set
        assert!(session.config().picker.ignore_folders.is_empty());
    }

    #[test]
    fn test_dispatch_open_success() {
        let mut host = RecordingHost::default();
        dispatch_open(&mut host, "/w/a.ts");

        assert_eq!(host.opened, vec!["/w/a.ts"]);
        assert!(host.errors.is_empty());
    }

    #[test]
    fn test_dispatch_open_failure_shows_error_notice() {
        let mut host = RecordingHost {
            fail_open: true,
            ..RecordingHost::default()
        };
        dispatch_open(&mut host, "/w/a.ts");

        assert!(host.opened.is_empty());
        assert_eq!(host.errors.len(), 1);
        assert_eq!(
            host.errors[0],
            "Failed to open document: no such document: /w/a.ts"
        );
    }
}
