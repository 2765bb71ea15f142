//! Core traits for the model/view architecture.
//!
//! This module defines the query surface that views and accessibility
//! adapters use to read a model without knowing its storage.

use pieview_core::Signal;

use super::index::ModelIndex;
use super::role::{ItemData, ItemRole};

/// Flags indicating what operations are allowed on an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemFlags {
    /// Item can be selected.
    pub selectable: bool,
    /// Item can be edited.
    pub editable: bool,
    /// Item is enabled (can interact).
    pub enabled: bool,
}

impl ItemFlags {
    /// Creates flags with all defaults (selectable and enabled only).
    pub fn new() -> Self {
        Self {
            selectable: true,
            enabled: true,
            ..Default::default()
        }
    }

    /// Creates flags for a disabled item.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Sets the selectable flag.
    pub fn with_selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// Sets the editable flag.
    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    /// Sets the enabled flag.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// The core trait for flat, grid-shaped item models.
///
/// `ItemModel` provides the query surface views and accessibility adapters
/// use to read and write cell data. The grid is two-dimensional and flat;
/// there is no parent/child hierarchy.
///
/// # Implementation Requirements
///
/// At minimum, you must implement:
/// - [`row_count`](ItemModel::row_count) - Number of rows
/// - [`column_count`](ItemModel::column_count) - Number of columns
/// - [`data`](ItemModel::data) - Data for a given index and role
/// - [`index`](ItemModel::index) - Create an index for a position
/// - [`signals`](ItemModel::signals) - Mutation notifications
///
/// For editable models, also implement:
/// - [`set_data`](ItemModel::set_data) - Modify data at an index
/// - [`flags`](ItemModel::flags) - Return appropriate flags
pub trait ItemModel: Send + Sync {
    /// Returns the number of rows.
    fn row_count(&self) -> usize;

    /// Returns the number of columns.
    fn column_count(&self) -> usize;

    /// Returns the data stored under the given role for the cell at index.
    ///
    /// Return `ItemData::None` if:
    /// - The index is invalid or stale
    /// - The role is not supported
    /// - There's no data for that role
    fn data(&self, index: &ModelIndex, role: ItemRole) -> ItemData;

    /// Creates a model index for the given position.
    ///
    /// Return `ModelIndex::invalid()` if the position is out of bounds.
    fn index(&self, row: usize, column: usize) -> ModelIndex;

    /// Returns the signals for this model.
    ///
    /// Views connect to these signals to receive notifications about data
    /// changes, insertions and removals.
    fn signals(&self) -> &ModelSignals;

    // -------------------------------------------------------------------------
    // Optional methods with default implementations
    // -------------------------------------------------------------------------

    /// Sets the data for the given index and role.
    ///
    /// Returns `true` if the data was successfully set. The default
    /// implementation returns `false` (read-only).
    ///
    /// Implementations should emit `data_changed` after modifying data.
    fn set_data(&self, _index: &ModelIndex, _value: ItemData, _role: ItemRole) -> bool {
        false
    }

    /// Returns the flags for the cell at the given index.
    ///
    /// The default returns selectable and enabled flags.
    fn flags(&self, _index: &ModelIndex) -> ItemFlags {
        ItemFlags::new()
    }

    /// Returns `true` if the index still refers to a live cell.
    ///
    /// The default re-derives the index from its position and compares
    /// identities, which catches indices left over from removed rows.
    fn contains(&self, index: &ModelIndex) -> bool {
        index.is_valid() && self.index(index.row(), index.column()) == *index
    }

    /// Creates a validated index for the same row at another column.
    fn sibling(&self, index: &ModelIndex, column: usize) -> ModelIndex {
        if !index.is_valid() {
            return ModelIndex::invalid();
        }
        self.index(index.row(), column)
    }
}

/// Collection of signals emitted by item models.
///
/// Models emit the paired `*_about_to_be_*` / `*_*` signals around each
/// structural mutation so observers can react both before storage changes
/// and after.
pub struct ModelSignals {
    /// Emitted just before rows are inserted. Args: (first row, last row)
    pub rows_about_to_be_inserted: Signal<(usize, usize)>,

    /// Emitted after rows have been inserted. Args: (first row, last row)
    pub rows_inserted: Signal<(usize, usize)>,

    /// Emitted just before rows are removed. Args: (first row, last row)
    pub rows_about_to_be_removed: Signal<(usize, usize)>,

    /// Emitted after rows have been removed. Args: (first row, last row)
    pub rows_removed: Signal<(usize, usize)>,

    /// Emitted when data in existing cells changes.
    /// Args: (changed index, changed roles)
    pub data_changed: Signal<(ModelIndex, Vec<ItemRole>)>,

    /// Emitted before the model is reset.
    pub model_about_to_reset: Signal<()>,

    /// Emitted after the model has been reset.
    pub model_reset: Signal<()>,
}

impl Default for ModelSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelSignals {
    /// Creates a new set of model signals.
    pub fn new() -> Self {
        Self {
            rows_about_to_be_inserted: Signal::new(),
            rows_inserted: Signal::new(),
            rows_about_to_be_removed: Signal::new(),
            rows_removed: Signal::new(),
            data_changed: Signal::new(),
            model_about_to_reset: Signal::new(),
            model_reset: Signal::new(),
        }
    }

    /// Emits signals for row insertion.
    ///
    /// Calls the provided function between the about-to-be-inserted and
    /// inserted signals.
    pub fn emit_rows_inserted<F>(&self, first: usize, last: usize, insert_fn: F)
    where
        F: FnOnce(),
    {
        self.rows_about_to_be_inserted.emit((first, last));
        insert_fn();
        self.rows_inserted.emit((first, last));
    }

    /// Emits signals for row removal.
    ///
    /// Calls the provided function between the about-to-be-removed and
    /// removed signals.
    pub fn emit_rows_removed<F>(&self, first: usize, last: usize, remove_fn: F)
    where
        F: FnOnce(),
    {
        self.rows_about_to_be_removed.emit((first, last));
        remove_fn();
        self.rows_removed.emit((first, last));
    }

    /// Emits the data_changed signal for a single cell.
    pub fn emit_data_changed_single(&self, index: ModelIndex, roles: Vec<ItemRole>) {
        self.data_changed.emit((index, roles));
    }

    /// Emits signals for a model reset.
    ///
    /// Calls the provided function between the about-to-reset and reset
    /// signals.
    pub fn emit_reset<F>(&self, reset_fn: F)
    where
        F: FnOnce(),
    {
        self.model_about_to_reset.emit(());
        reset_fn();
        self.model_reset.emit(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_item_flags() {
        let flags = ItemFlags::new();
        assert!(flags.selectable);
        assert!(flags.enabled);
        assert!(!flags.editable);

        let disabled = ItemFlags::disabled();
        assert!(!disabled.enabled);
        assert!(!disabled.selectable);

        let locked = ItemFlags::new().with_selectable(false).with_editable(true);
        assert!(!locked.selectable);
        assert!(locked.editable);
    }

    #[test]
    fn test_emit_rows_removed_order() {
        let signals = ModelSignals::new();
        let events = Arc::new(Mutex::new(Vec::new()));

        let recv = events.clone();
        signals
            .rows_about_to_be_removed
            .connect(move |(first, last)| recv.lock().push(("about", *first, *last)));

        let recv = events.clone();
        signals
            .rows_removed
            .connect(move |(first, last)| recv.lock().push(("done", *first, *last)));

        let mid = events.clone();
        signals.emit_rows_removed(1, 2, || mid.lock().push(("mutate", 0, 0)));

        let events = events.lock();
        assert_eq!(
            *events,
            vec![("about", 1, 2), ("mutate", 0, 0), ("done", 1, 2)]
        );
    }

    #[test]
    fn test_emit_reset() {
        let signals = ModelSignals::new();
        let counter = Arc::new(Mutex::new(0));

        let c1 = counter.clone();
        signals.model_about_to_reset.connect(move |_| *c1.lock() += 1);
        let c2 = counter.clone();
        signals.model_reset.connect(move |_| *c2.lock() += 10);

        signals.emit_reset(|| {});
        assert_eq!(*counter.lock(), 11);
    }
}
