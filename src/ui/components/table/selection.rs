//! Selection state for the record table.
//!
//! Selection is keyed by item identifier and keeps insertion order, so the
//! values reported to observers follow the order in which items were added.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// How many rows a table lets the user select.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Rows cannot be selected; clicks are ignored.
    #[default]
    None,
    /// At most one row is selected at a time.
    Single,
    /// Any number of rows can be selected.
    Multiple,
}

impl SelectionMode {
    /// Whether this mode allows any selection at all.
    pub fn is_enabled(&self) -> bool {
        !matches!(self, SelectionMode::None)
    }
}

/// The kind of user activation that reached a row.
///
/// Only primary activations (left click, tap, space) change the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Left mouse button or keyboard activation.
    Primary,
    /// Right mouse button.
    Secondary,
    /// Middle mouse button.
    Middle,
}

impl Interaction {
    /// Returns true for primary activations.
    pub fn is_primary(&self) -> bool {
        matches!(self, Interaction::Primary)
    }
}

/// Identifier-keyed selection set.
///
/// The mode is fixed at construction. In `Single` mode the set never holds
/// more than one entry and in `None` mode it is always empty.
#[derive(Debug, Clone)]
pub struct Selection<T> {
    mode: SelectionMode,
    entries: IndexMap<String, T>,
}

impl<T: Clone> Selection<T> {
    /// Create an empty selection for the given mode.
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            entries: IndexMap::new(),
        }
    }

    /// The selection mode.
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Replace the selection with the given pre-selected entries.
    ///
    /// In `Single` mode only the last entry is kept.
    pub fn seed(&mut self, entries: impl IntoIterator<Item = (String, T)>) {
        self.entries.clear();
        if !self.mode.is_enabled() {
            return;
        }
        self.entries.extend(entries);
        self.enforce_bound();
    }

    /// Toggle an entry.
    ///
    /// Removes it if already selected. Otherwise `Multiple` mode adds it and
    /// `Single` mode replaces the whole set with it. Returns false (and does
    /// nothing) in `None` mode.
    pub fn toggle(&mut self, id: String, item: &T) -> bool {
        match self.mode {
            SelectionMode::None => return false,
            _ if self.entries.contains_key(&id) => {
                self.entries.shift_remove(&id);
            }
            SelectionMode::Multiple => {
                self.entries.insert(id, item.clone());
            }
            SelectionMode::Single => {
                self.entries.clear();
                self.entries.insert(id, item.clone());
            }
        }
        true
    }

    /// Merge visible entries into the selection, keeping existing ones.
    ///
    /// Entries already present keep their position and take the new value.
    /// In `Single` mode the last merged entry wins. Returns false in `None`
    /// mode.
    pub fn merge_visible(&mut self, visible: impl IntoIterator<Item = (String, T)>) -> bool {
        if !self.mode.is_enabled() {
            return false;
        }
        for (id, item) in visible {
            if self.mode == SelectionMode::Single {
                self.entries.clear();
            }
            self.entries.insert(id, item);
        }
        true
    }

    /// Remove every entry. Returns false in `None` mode.
    pub fn clear(&mut self) -> bool {
        if !self.mode.is_enabled() {
            return false;
        }
        self.entries.clear();
        true
    }

    /// Check whether an identifier is selected.
    pub fn contains(&self, id: &str) -> bool {
        self.mode.is_enabled() && self.entries.contains_key(id)
    }

    /// Selected values in set order.
    pub fn values(&self) -> Vec<T> {
        self.entries.values().cloned().collect()
    }

    /// Selected identifiers in set order.
    pub fn ids(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Number of selected entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn enforce_bound(&mut self) {
        if self.mode == SelectionMode::Single && self.entries.len() > 1 {
            let last = self.entries.pop();
            self.entries.clear();
            if let Some((id, item)) = last {
                self.entries.insert(id, item);
            }
        }
    }
}

impl<T: Clone> Default for Selection<T> {
    fn default() -> Self {
        Self::new(SelectionMode::default())
    }
}
