//! The two-column pie data model.
//!
//! Column 0 holds the category text, column 1 the numeric slice value.
//! Rows are stored in a generation-tagged slot map so durable cell
//! references ([`PersistentIndex`]) and cached accessible interfaces keep
//! their identity while rows are inserted and removed around them.

use std::any::Any;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use slotmap::SlotMap;

use super::index::ModelIndex;
use super::persistent::{PersistentIndex, RowKey};
use super::role::{ItemData, ItemRole};
use super::traits::{ItemFlags, ItemModel, ModelSignals};

/// Column of the category text.
pub const CATEGORY_COLUMN: usize = 0;
/// Column of the numeric slice value.
pub const VALUE_COLUMN: usize = 1;

const COLUMN_COUNT: usize = 2;

/// A cached accessible-interface handle, type-erased so the model does not
/// depend on the adapter layer.
pub type InterfaceHandle = Arc<dyn Any + Send + Sync>;

/// Hook invoked for every cached interface of a row that is being removed.
///
/// Called synchronously during the removal, before the row's storage is
/// reclaimed. The hook must not call back into the model.
pub type InterfaceReleaseHook = Box<dyn Fn(InterfaceHandle) + Send + Sync>;

/// Data stored for one pie slice (one model row).
struct RowData {
    category: String,
    value: f64,
    selectable: [bool; COLUMN_COUNT],
    descriptions: [String; COLUMN_COUNT],
}

impl RowData {
    fn new(category: impl Into<String>, value: f64) -> Self {
        Self {
            category: category.into(),
            value,
            selectable: [true; COLUMN_COUNT],
            descriptions: Default::default(),
        }
    }
}

struct Storage {
    rows: SlotMap<RowKey, RowData>,
    order: Vec<RowKey>,
}

/// The pie chart's item model: a flat grid of category/value rows.
///
/// # Example
///
/// ```
/// use pieview::model::{ItemModel, ItemRole, PieModel};
///
/// let model = PieModel::with_rows(&[("Scientific Research", 21.0), ("Engineering", 79.0)]);
/// assert_eq!(model.row_count(), 2);
/// assert_eq!(model.total(), 100.0);
///
/// let index = model.index(0, 0);
/// assert_eq!(
///     model.data(&index, ItemRole::Display).into_string().as_deref(),
///     Some("Scientific Research")
/// );
/// ```
pub struct PieModel {
    storage: RwLock<Storage>,
    signals: ModelSignals,

    /// Cached accessible interfaces keyed by cell identity. The model owns
    /// this mapping so that the interfaces can be released in the same
    /// breath as their row.
    interfaces: Mutex<Vec<((RowKey, usize), InterfaceHandle)>>,
    release_hook: Mutex<Option<InterfaceReleaseHook>>,
}

impl Default for PieModel {
    fn default() -> Self {
        Self::new()
    }
}

impl PieModel {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self {
            storage: RwLock::new(Storage {
                rows: SlotMap::with_key(),
                order: Vec::new(),
            }),
            signals: ModelSignals::new(),
            interfaces: Mutex::new(Vec::new()),
            release_hook: Mutex::new(None),
        }
    }

    /// Creates a model pre-filled with (category, value) rows.
    pub fn with_rows(rows: &[(&str, f64)]) -> Self {
        let model = Self::new();
        for &(category, value) in rows {
            model.append_row(category, value);
        }
        model
    }

    /// Appends a row at the end.
    pub fn append_row(&self, category: impl Into<String>, value: f64) {
        let at = self.row_count();
        self.insert_row(at, category, value);
    }

    /// Inserts a row at the given position.
    ///
    /// # Panics
    ///
    /// Panics if `at` is greater than the current row count.
    pub fn insert_row(&self, at: usize, category: impl Into<String>, value: f64) {
        let category = category.into();
        assert!(
            at <= self.row_count(),
            "row insertion position {at} out of bounds"
        );
        tracing::debug!(target: "pieview::model", row = at, %category, value, "inserting row");
        self.signals.emit_rows_inserted(at, at, || {
            let mut storage = self.storage.write();
            let key = storage.rows.insert(RowData::new(category, value));
            storage.order.insert(at, key);
        });
    }

    /// Removes `count` rows starting at `first`.
    ///
    /// Cached accessible interfaces of the removed rows are handed to the
    /// release hook synchronously, before the row storage is reclaimed.
    /// Returns `false` if the range does not lie within the model.
    pub fn remove_rows(&self, first: usize, count: usize) -> bool {
        {
            let storage = self.storage.read();
            let len = storage.order.len();
            if count == 0 || first >= len || count > len - first {
                return false;
            }
        }
        tracing::debug!(target: "pieview::model", first, count, "removing rows");
        self.signals.emit_rows_removed(first, first + count - 1, || {
            let mut storage = self.storage.write();
            for _ in 0..count {
                let key = storage.order.remove(first);
                self.release_interfaces_of(key);
                storage.rows.remove(key);
            }
        });
        true
    }

    /// Removes all rows.
    pub fn clear(&self) {
        self.signals.emit_reset(|| {
            let mut storage = self.storage.write();
            let keys: Vec<RowKey> = storage.order.drain(..).collect();
            for key in keys {
                self.release_interfaces_of(key);
                storage.rows.remove(key);
            }
        });
    }

    /// Sum of all slice values. This is the denominator used when slices
    /// are announced as percentages.
    pub fn total(&self) -> f64 {
        self.storage.read().rows.values().map(|row| row.value).sum()
    }

    /// Marks one cell as selectable or not.
    pub fn set_selectable(&self, row: usize, column: usize, selectable: bool) {
        let index = self.index(row, column);
        if !index.is_valid() {
            return;
        }
        let key = RowKey::from_raw(index.internal_id());
        if let Some(data) = self.storage.write().rows.get_mut(key) {
            data.selectable[column] = selectable;
        }
    }

    // -------------------------------------------------------------------------
    // Durable cell references
    // -------------------------------------------------------------------------

    /// Creates a durable reference to the cell at `index`.
    ///
    /// Returns `None` for invalid or stale indices.
    pub fn persistent_index(&self, index: &ModelIndex) -> Option<PersistentIndex> {
        if !index.is_valid() || index.column() >= COLUMN_COUNT {
            return None;
        }
        let key = RowKey::from_raw(index.internal_id());
        if !self.storage.read().rows.contains_key(key) {
            return None;
        }
        Some(PersistentIndex::new(key, index.column()))
    }

    /// Resolves a durable reference to the cell's live position.
    ///
    /// Returns the invalid index once the referenced row has been removed.
    pub fn resolve(&self, reference: &PersistentIndex) -> ModelIndex {
        let storage = self.storage.read();
        if !storage.rows.contains_key(reference.key()) {
            return ModelIndex::invalid();
        }
        match storage.order.iter().position(|&k| k == reference.key()) {
            Some(row) => ModelIndex::new(row, reference.column(), reference.key().as_raw()),
            None => ModelIndex::invalid(),
        }
    }

    // -------------------------------------------------------------------------
    // Accessible-interface identity cache
    // -------------------------------------------------------------------------

    /// Installs the hook that releases cached interfaces of removed rows.
    pub fn set_interface_release_hook(&self, hook: InterfaceReleaseHook) {
        *self.release_hook.lock() = Some(hook);
    }

    /// Looks up the cached accessible interface of one cell.
    pub fn cached_interface(&self, key: RowKey, column: usize) -> Option<InterfaceHandle> {
        self.interfaces
            .lock()
            .iter()
            .find(|(cell, _)| *cell == (key, column))
            .map(|(_, handle)| handle.clone())
    }

    /// Stores the accessible interface of one cell, replacing any previous
    /// entry for that cell.
    pub fn cache_interface(&self, key: RowKey, column: usize, handle: InterfaceHandle) {
        let mut interfaces = self.interfaces.lock();
        interfaces.retain(|(cell, _)| *cell != (key, column));
        interfaces.push(((key, column), handle));
    }

    /// Releases every cached interface through the release hook, without
    /// touching row data. The adapter layer calls this when the widget is
    /// destroyed.
    pub fn release_all_interfaces(&self) {
        let all: Vec<InterfaceHandle> = {
            let mut interfaces = self.interfaces.lock();
            interfaces.drain(..).map(|(_, handle)| handle).collect()
        };
        if all.is_empty() {
            return;
        }
        if let Some(hook) = self.release_hook.lock().as_ref() {
            for handle in all {
                hook(handle);
            }
        }
    }

    fn release_interfaces_of(&self, key: RowKey) {
        let removed: Vec<InterfaceHandle> = {
            let mut interfaces = self.interfaces.lock();
            let (dropped, kept): (Vec<_>, Vec<_>) = interfaces
                .drain(..)
                .partition(|((row, _), _)| *row == key);
            *interfaces = kept;
            dropped.into_iter().map(|(_, handle)| handle).collect()
        };
        if removed.is_empty() {
            return;
        }
        tracing::debug!(
            target: "pieview::model",
            count = removed.len(),
            "releasing cached accessible interfaces"
        );
        if let Some(hook) = self.release_hook.lock().as_ref() {
            for handle in removed {
                hook(handle);
            }
        }
    }
}

impl ItemModel for PieModel {
    fn row_count(&self) -> usize {
        self.storage.read().order.len()
    }

    fn column_count(&self) -> usize {
        COLUMN_COUNT
    }

    fn data(&self, index: &ModelIndex, role: ItemRole) -> ItemData {
        if !index.is_valid() || index.column() >= COLUMN_COUNT {
            return ItemData::None;
        }
        let key = RowKey::from_raw(index.internal_id());
        let storage = self.storage.read();
        let Some(row) = storage.rows.get(key) else {
            return ItemData::None;
        };
        match role {
            ItemRole::Display | ItemRole::Edit => match index.column() {
                CATEGORY_COLUMN => ItemData::Text(row.category.clone()),
                _ => ItemData::Number(row.value),
            },
            ItemRole::AccessibleDescription => {
                let description = &row.descriptions[index.column()];
                if description.is_empty() {
                    ItemData::None
                } else {
                    ItemData::Text(description.clone())
                }
            }
            _ => ItemData::None,
        }
    }

    fn index(&self, row: usize, column: usize) -> ModelIndex {
        let storage = self.storage.read();
        if row >= storage.order.len() || column >= COLUMN_COUNT {
            return ModelIndex::invalid();
        }
        ModelIndex::new(row, column, storage.order[row].as_raw())
    }

    fn signals(&self) -> &ModelSignals {
        &self.signals
    }

    fn set_data(&self, index: &ModelIndex, value: ItemData, role: ItemRole) -> bool {
        if !index.is_valid() || index.column() >= COLUMN_COUNT {
            return false;
        }
        let key = RowKey::from_raw(index.internal_id());
        let changed = {
            let mut storage = self.storage.write();
            let Some(row) = storage.rows.get_mut(key) else {
                return false;
            };
            match (role, value) {
                (ItemRole::Display | ItemRole::Edit, ItemData::Text(text))
                    if index.column() == CATEGORY_COLUMN =>
                {
                    row.category = text;
                    true
                }
                (ItemRole::Display | ItemRole::Edit, ItemData::Number(number))
                    if index.column() == VALUE_COLUMN =>
                {
                    row.value = number;
                    true
                }
                (ItemRole::AccessibleDescription, ItemData::Text(text)) => {
                    row.descriptions[index.column()] = text;
                    true
                }
                _ => false,
            }
        };
        if changed {
            self.signals
                .emit_data_changed_single(self.resolve_key(key, index.column()), vec![role]);
        }
        changed
    }

    fn flags(&self, index: &ModelIndex) -> ItemFlags {
        if !index.is_valid() || index.column() >= COLUMN_COUNT {
            return ItemFlags::disabled();
        }
        let key = RowKey::from_raw(index.internal_id());
        match self.storage.read().rows.get(key) {
            Some(row) => ItemFlags::new().with_selectable(row.selectable[index.column()]),
            None => ItemFlags::disabled(),
        }
    }

    fn contains(&self, index: &ModelIndex) -> bool {
        if !index.is_valid() || index.column() >= COLUMN_COUNT {
            return false;
        }
        self.storage
            .read()
            .rows
            .contains_key(RowKey::from_raw(index.internal_id()))
    }
}

impl PieModel {
    /// Index of the row identified by `key` at `column`, with the row's
    /// current position filled in.
    fn resolve_key(&self, key: RowKey, column: usize) -> ModelIndex {
        let storage = self.storage.read();
        match storage.order.iter().position(|&k| k == key) {
            Some(row) => ModelIndex::new(row, column, key.as_raw()),
            None => ModelIndex::invalid(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sample() -> PieModel {
        PieModel::with_rows(&[
            ("Scientific Research", 21.0),
            ("Engineering", 54.0),
            ("Arts", 25.0),
        ])
    }

    #[test]
    fn test_dimensions_and_total() {
        let model = sample();
        assert_eq!(model.row_count(), 3);
        assert_eq!(model.column_count(), 2);
        assert_eq!(model.total(), 100.0);
    }

    #[test]
    fn test_data_by_role() {
        let model = sample();
        let category = model.index(1, CATEGORY_COLUMN);
        let value = model.index(1, VALUE_COLUMN);

        assert_eq!(
            model.data(&category, ItemRole::Display).into_string().as_deref(),
            Some("Engineering")
        );
        assert_eq!(model.data(&value, ItemRole::Display).as_f64(), Some(54.0));
        assert!(model.data(&category, ItemRole::ToolTip).is_none());
        assert!(model.data(&ModelIndex::invalid(), ItemRole::Display).is_none());
    }

    #[test]
    fn test_set_data_round_trip() {
        let model = sample();
        let index = model.index(0, VALUE_COLUMN);

        assert!(model.set_data(&index, ItemData::from(30.0), ItemRole::Edit));
        assert_eq!(model.data(&index, ItemRole::Display).as_f64(), Some(30.0));

        assert!(model.set_data(&index, ItemData::from("note"), ItemRole::AccessibleDescription));
        assert_eq!(
            model
                .data(&index, ItemRole::AccessibleDescription)
                .into_string()
                .as_deref(),
            Some("note")
        );

        // Text into the value column is rejected.
        assert!(!model.set_data(&index, ItemData::from("nope"), ItemRole::Edit));
    }

    #[test]
    fn test_flags_follow_selectable_bit() {
        let model = sample();
        let index = model.index(2, CATEGORY_COLUMN);
        assert!(model.flags(&index).selectable);

        model.set_selectable(2, CATEGORY_COLUMN, false);
        assert!(!model.flags(&index).selectable);
        assert!(model.flags(&model.index(2, VALUE_COLUMN)).selectable);
    }

    #[test]
    fn test_persistent_index_survives_removal_of_earlier_row() {
        let model = sample();
        let reference = model
            .persistent_index(&model.index(2, VALUE_COLUMN))
            .unwrap();

        assert!(model.remove_rows(0, 1));

        let resolved = model.resolve(&reference);
        assert!(resolved.is_valid());
        assert_eq!(resolved.row(), 1);
        assert_eq!(resolved.column(), VALUE_COLUMN);
        assert_eq!(
            model.data(&resolved, ItemRole::Display).as_f64(),
            Some(25.0)
        );
    }

    #[test]
    fn test_persistent_index_invalidated_by_own_row_removal() {
        let model = sample();
        let reference = model
            .persistent_index(&model.index(1, CATEGORY_COLUMN))
            .unwrap();

        assert!(model.remove_rows(1, 1));
        assert!(!model.resolve(&reference).is_valid());
    }

    #[test]
    fn test_remove_rows_bounds() {
        let model = sample();
        assert!(!model.remove_rows(2, 2));
        assert!(!model.remove_rows(0, 0));
        assert!(model.remove_rows(0, 3));
        assert_eq!(model.row_count(), 0);
    }

    #[test]
    fn test_stale_index_does_not_shift() {
        let model = sample();
        let stale = model.index(0, CATEGORY_COLUMN);
        assert!(model.remove_rows(0, 1));

        // The old first row is gone; its index must not alias the new first row.
        assert!(!model.contains(&stale));
        assert!(model.data(&stale, ItemRole::Display).is_none());
    }

    #[test]
    fn test_release_hook_runs_during_removal() {
        let model = sample();
        let released = Arc::new(AtomicUsize::new(0));

        let counter = released.clone();
        model.set_interface_release_hook(Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        let key = RowKey::from_raw(model.index(0, 0).internal_id());
        model.cache_interface(key, 0, Arc::new(17usize));
        model.cache_interface(key, 1, Arc::new(18usize));

        let rows_removed_seen = Arc::new(AtomicUsize::new(0));
        let released_at_signal = released.clone();
        let seen = rows_removed_seen.clone();
        model.signals().rows_removed.connect(move |_| {
            // By the time removal is announced, the interfaces are released.
            seen.store(released_at_signal.load(Ordering::SeqCst), Ordering::SeqCst);
        });

        assert!(model.remove_rows(0, 1));
        assert_eq!(released.load(Ordering::SeqCst), 2);
        assert_eq!(rows_removed_seen.load(Ordering::SeqCst), 2);
        assert!(model.cached_interface(key, 0).is_none());
    }

    #[test]
    fn test_cache_interface_replaces() {
        let model = sample();
        let key = RowKey::from_raw(model.index(0, 0).internal_id());

        let first: InterfaceHandle = Arc::new(1usize);
        let second: InterfaceHandle = Arc::new(2usize);
        model.cache_interface(key, 0, first);
        model.cache_interface(key, 0, second.clone());

        let cached = model.cached_interface(key, 0).unwrap();
        assert!(Arc::ptr_eq(&cached, &second));
    }

    #[test]
    fn test_clear_resets_model() {
        let model = sample();
        let reference = model.persistent_index(&model.index(0, 0)).unwrap();
        model.clear();
        assert_eq!(model.row_count(), 0);
        assert_eq!(model.total(), 0.0);
        assert!(!model.resolve(&reference).is_valid());
    }
}
