//! Selection model for item views.
//!
//! [`SelectionModel`] tracks which cells are selected and which cell is
//! current (has keyboard focus), independent of the model's data storage.
//! The view owns it; accessibility adapters read it on every query and
//! never cache its answers.

use std::collections::HashSet;

use pieview_core::Signal;

use super::index::ModelIndex;

/// Selection behavior mode for views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// No items can be selected.
    NoSelection,
    /// Only one item can be selected at a time (default).
    #[default]
    SingleSelection,
    /// Multiple items can be selected with Ctrl+click.
    MultiSelection,
    /// Range selection with Shift+click, extended by Ctrl+click.
    ExtendedSelection,
}

/// Manages selection state for item views.
///
/// # Signals
///
/// - `selection_changed`: emitted when selection changes, with
///   (selected, deselected) indices
/// - `current_changed`: emitted when the current index changes, with
///   (new, old) indices
pub struct SelectionModel {
    /// Current selection mode.
    mode: SelectionMode,

    /// The current index (has keyboard focus).
    current: ModelIndex,

    /// Selected cell identities (row identity, column) for O(1) lookup.
    selected_ids: HashSet<(u64, usize)>,

    /// Ordered list of selected indices.
    selected_indices: Vec<ModelIndex>,

    /// Emitted when selection changes. Args: (selected, deselected)
    pub selection_changed: Signal<(Vec<ModelIndex>, Vec<ModelIndex>)>,

    /// Emitted when the current index changes. Args: (new, old)
    pub current_changed: Signal<(ModelIndex, ModelIndex)>,
}

impl Default for SelectionModel {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionModel {
    /// Creates a new selection model with default settings.
    pub fn new() -> Self {
        Self {
            mode: SelectionMode::default(),
            current: ModelIndex::invalid(),
            selected_ids: HashSet::new(),
            selected_indices: Vec::new(),
            selection_changed: Signal::new(),
            current_changed: Signal::new(),
        }
    }

    /// Gets the current selection mode.
    pub fn selection_mode(&self) -> SelectionMode {
        self.mode
    }

    /// Sets the selection mode.
    ///
    /// Changing mode does not clear existing selection, but subsequent
    /// selections follow the new mode's behavior.
    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
    }

    /// The current (keyboard focus) index, or an invalid index if none.
    pub fn current_index(&self) -> ModelIndex {
        self.current.clone()
    }

    /// Sets the current index.
    pub fn set_current(&mut self, index: ModelIndex) {
        if index == self.current {
            return;
        }
        let old = std::mem::replace(&mut self.current, index.clone());
        self.current_changed.emit((index, old));
    }

    /// Returns `true` if the cell at the given index is selected.
    pub fn is_selected(&self, index: &ModelIndex) -> bool {
        index.is_valid() && self.selected_ids.contains(&Self::id_of(index))
    }

    /// The selected indices, in selection order.
    pub fn selected_indices(&self) -> &[ModelIndex] {
        &self.selected_indices
    }

    /// Selects the cell at the given index.
    ///
    /// In single-selection mode this replaces the existing selection. Does
    /// nothing for invalid indices or in [`SelectionMode::NoSelection`].
    pub fn select(&mut self, index: ModelIndex) {
        if !index.is_valid() || self.mode == SelectionMode::NoSelection {
            return;
        }
        if self.is_selected(&index) {
            return;
        }

        let deselected = if self.mode == SelectionMode::SingleSelection {
            self.take_all()
        } else {
            Vec::new()
        };

        self.selected_ids.insert(Self::id_of(&index));
        self.selected_indices.push(index.clone());
        self.selection_changed.emit((vec![index], deselected));
    }

    /// Deselects the cell at the given index.
    pub fn deselect(&mut self, index: &ModelIndex) {
        if !self.selected_ids.remove(&Self::id_of(index)) {
            return;
        }
        self.selected_indices.retain(|i| i != index);
        self.selection_changed.emit((Vec::new(), vec![index.clone()]));
    }

    /// Toggles the selection state of the cell at the given index.
    pub fn toggle(&mut self, index: ModelIndex) {
        if self.is_selected(&index) {
            self.deselect(&index);
        } else {
            self.select(index);
        }
    }

    /// Clears the entire selection.
    pub fn clear_selection(&mut self) {
        let deselected = self.take_all();
        if !deselected.is_empty() {
            self.selection_changed.emit((Vec::new(), deselected));
        }
    }

    /// Keeps only the selected indices for which the predicate holds.
    ///
    /// The current index is cleared as well when it fails the predicate.
    /// Views call this after row removal to prune references into rows that
    /// no longer exist.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&ModelIndex) -> bool,
    {
        let (kept, dropped): (Vec<_>, Vec<_>) = std::mem::take(&mut self.selected_indices)
            .into_iter()
            .partition(|index| keep(index));

        for index in &dropped {
            self.selected_ids.remove(&Self::id_of(index));
        }
        self.selected_indices = kept;

        if !dropped.is_empty() {
            self.selection_changed.emit((Vec::new(), dropped));
        }

        if self.current.is_valid() && !keep(&self.current.clone()) {
            self.set_current(ModelIndex::invalid());
        }
    }

    fn take_all(&mut self) -> Vec<ModelIndex> {
        self.selected_ids.clear();
        std::mem::take(&mut self.selected_indices)
    }

    fn id_of(index: &ModelIndex) -> (u64, usize) {
        (index.internal_id(), index.column())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idx(row: usize, column: usize) -> ModelIndex {
        // Stand-in for model-produced indices; identity tracks the row.
        ModelIndex::new(row, column, 100 + row as u64)
    }

    #[test]
    fn test_single_selection_replaces() {
        let mut selection = SelectionModel::new();
        selection.select(idx(0, 0));
        selection.select(idx(1, 0));

        assert!(!selection.is_selected(&idx(0, 0)));
        assert!(selection.is_selected(&idx(1, 0)));
        assert_eq!(selection.selected_indices().len(), 1);
    }

    #[test]
    fn test_multi_selection_accumulates() {
        let mut selection = SelectionModel::new();
        selection.set_selection_mode(SelectionMode::MultiSelection);
        selection.select(idx(0, 0));
        selection.select(idx(1, 0));

        assert!(selection.is_selected(&idx(0, 0)));
        assert!(selection.is_selected(&idx(1, 0)));
        assert_eq!(selection.selected_indices().len(), 2);
    }

    #[test]
    fn test_no_selection_mode() {
        let mut selection = SelectionModel::new();
        selection.set_selection_mode(SelectionMode::NoSelection);
        selection.select(idx(0, 0));
        assert!(selection.selected_indices().is_empty());
    }

    #[test]
    fn test_toggle_and_deselect() {
        let mut selection = SelectionModel::new();
        selection.set_selection_mode(SelectionMode::ExtendedSelection);

        selection.toggle(idx(2, 1));
        assert!(selection.is_selected(&idx(2, 1)));
        selection.toggle(idx(2, 1));
        assert!(!selection.is_selected(&idx(2, 1)));

        selection.select(idx(3, 0));
        selection.deselect(&idx(3, 0));
        assert!(selection.selected_indices().is_empty());
    }

    #[test]
    fn test_current_changed_signal() {
        use parking_lot::Mutex;
        use std::sync::Arc;

        let mut selection = SelectionModel::new();
        let changes = Arc::new(Mutex::new(Vec::new()));

        let recv = changes.clone();
        selection
            .current_changed
            .connect(move |(new, old)| recv.lock().push((new.is_valid(), old.is_valid())));

        selection.set_current(idx(0, 0));
        selection.set_current(idx(0, 0)); // no-op
        selection.set_current(ModelIndex::invalid());

        assert_eq!(*changes.lock(), vec![(true, false), (false, true)]);
    }

    #[test]
    fn test_retain_prunes_selection_and_current() {
        let mut selection = SelectionModel::new();
        selection.set_selection_mode(SelectionMode::MultiSelection);
        selection.select(idx(0, 0));
        selection.select(idx(1, 0));
        selection.set_current(idx(1, 0));

        selection.retain(|index| index.row() != 1);

        assert!(selection.is_selected(&idx(0, 0)));
        assert!(!selection.is_selected(&idx(1, 0)));
        assert!(!selection.current_index().is_valid());
    }
}
