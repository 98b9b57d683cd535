use crate::candidates::{basename, normalized_root};
use crate::favorites::FavoritesStore;
use crate::icons::{IconPair, IconRegistry};
use std::path::{Path, MAIN_SEPARATOR};
use tracing::debug;

/// Delimiter shown in place of the first path separator of a rendered
/// relative path
pub const VISUAL_DELIMITER: &str = ">";

/// Favorite-toggle affordance carried by a file row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteAction {
    Add,
    Remove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    File,
    Separator,
}

/// One row of the picker, as plain data for the host widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerItem {
    pub label: String,
    pub description: Option<String>,
    pub detail: Option<String>,
    pub icon: IconPair,
    pub favorite_action: Option<FavoriteAction>,
    pub kind: ItemKind,
}

impl PickerItem {
    pub fn file(label: String) -> Self {
        Self {
            label,
            description: None,
            detail: None,
            icon: IconPair::default(),
            favorite_action: None,
            kind: ItemKind::File,
        }
    }

    /// Divider between the favorites group and the rest
    pub fn separator() -> Self {
        Self {
            label: String::new(),
            description: None,
            detail: None,
            icon: IconPair::default(),
            favorite_action: None,
            kind: ItemKind::Separator,
        }
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }

    pub fn with_detail(mut self, detail: String) -> Self {
        self.detail = Some(detail);
        self
    }

    pub fn with_icon(mut self, icon: IconPair) -> Self {
        self.icon = icon;
        self
    }

    pub fn with_favorite_action(mut self, action: FavoriteAction) -> Self {
        self.favorite_action = Some(action);
        self
    }
}

/// Interaction events delivered by the host widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerEvent {
    /// Favorite-toggle affordance activated on a row
    ToggleFavorite { index: usize },
    /// Row accepted
    Select { index: usize },
    /// Picker dismissed without selection (escape, click-away)
    Dismiss,
}

/// What the host should do in response to an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEffect {
    /// Replace the displayed rows; the picker stays open
    Rerender(Vec<PickerItem>),
    /// Picker closed; ask the host to open this absolute path
    OpenDocument(String),
    /// Picker closed with no further action
    Closed,
    /// Event ignored (separator row, unknown row, or picker already
    /// closed)
    Ignored,
}

/// Candidate list plus interaction state for one picker invocation.
/// Selection and dismissal both close it for good; later events are
/// ignored.
#[derive(Debug)]
pub struct Picker {
    root: String,
    show_detail: bool,
    candidates: Vec<String>,
    /// Absolute path backing each rendered row; None for the separator
    rows: Vec<Option<String>>,
    open: bool,
}

impl Picker {
    pub(crate) fn new(workspace_root: &str, show_detail: bool, candidates: Vec<String>) -> Self {
        Self {
            root: normalized_root(workspace_root),
            show_detail,
            candidates,
            rows: Vec::new(),
            open: true,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Build the rows: favorited candidates first, a separator when both
    /// groups are non-empty, then the rest. Candidate order is preserved
    /// inside each group.
    pub fn render(&mut self, favorites: &FavoritesStore, icons: &IconRegistry) -> Vec<PickerItem> {
        let (favorited, rest): (Vec<String>, Vec<String>) = self
            .candidates
            .iter()
            .cloned()
            .partition(|path| favorites.is_favorite(path));

        let mut items = Vec::with_capacity(favorited.len() + rest.len() + 1);
        self.rows.clear();

        for path in &favorited {
            items.push(self.file_item(path, FavoriteAction::Remove, icons));
            self.rows.push(Some(path.clone()));
        }

        if !favorited.is_empty() && !rest.is_empty() {
            items.push(PickerItem::separator());
            self.rows.push(None);
        }

        for path in &rest {
            items.push(self.file_item(path, FavoriteAction::Add, icons));
            self.rows.push(Some(path.clone()));
        }

        items
    }

    /// Advance the interaction. Toggling re-renders in place; selection
    /// and dismissal close the picker.
    pub fn handle_event(
        &mut self,
        event: PickerEvent,
        favorites: &mut FavoritesStore,
        icons: &IconRegistry,
    ) -> PickerEffect {
        if !self.open {
            debug!("Picker event after close ignored: {:?}", event);
            return PickerEffect::Ignored;
        }

        match event {
            PickerEvent::ToggleFavorite { index } => match self.row_path(index) {
                Some(path) => {
                    favorites.toggle(&path);
                    PickerEffect::Rerender(self.render(favorites, icons))
                }
                None => PickerEffect::Ignored,
            },
            PickerEvent::Select { index } => match self.row_path(index) {
                Some(path) => {
                    self.open = false;
                    let rendered = self.rendered_relative(&path);
                    PickerEffect::OpenDocument(self.resolve_selection(&rendered))
                }
                None => PickerEffect::Ignored,
            },
            PickerEvent::Dismiss => {
                self.open = false;
                PickerEffect::Closed
            }
        }
    }

    fn row_path(&self, index: usize) -> Option<String> {
        self.rows.get(index).and_then(|row| row.clone())
    }

    fn file_item(&self, path: &str, action: FavoriteAction, icons: &IconRegistry) -> PickerItem {
        let rendered = self.rendered_relative(path);
        let extension = Path::new(path).extension().and_then(|ext| ext.to_str());

        let item = PickerItem::file(basename(path).to_string())
            .with_icon(icons.resolve(extension))
            .with_favorite_action(action);

        if self.show_detail {
            item.with_detail(rendered)
        } else {
            item.with_description(rendered)
        }
    }

    /// Workspace-relative path with only the first separator swapped for
    /// the visual delimiter. Paths nested more than one level deep keep
    /// their remaining separators, rendering with mixed delimiters.
    fn rendered_relative(&self, path: &str) -> String {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        relative.replacen(MAIN_SEPARATOR, VISUAL_DELIMITER, 1)
    }

    /// Absolute path for a selected row: the workspace root joined with
    /// the rendered text, first visual delimiter converted back
    fn resolve_selection(&self, rendered: &str) -> String {
        let relative = rendered.replacen(VISUAL_DELIMITER, &MAIN_SEPARATOR.to_string(), 1);
        format!("{}{}", self.root, relative)
    }
}
