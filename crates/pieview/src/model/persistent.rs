//! Durable cell references.
//!
//! A [`ModelIndex`](super::ModelIndex) captures a (row, column) position at
//! one instant; once rows are inserted or removed above it, the numbers it
//! holds point at the wrong cell. A [`PersistentIndex`] instead holds the
//! row's generation-tagged storage key, so it keeps resolving to the same
//! logical cell as the grid shifts, and resolves to nothing once the row is
//! gone.

use slotmap::{Key, KeyData};

slotmap::new_key_type! {
    /// Stable, generation-tagged identity of one model row.
    ///
    /// Keys are never reused for a different row: removing a row bumps the
    /// slot's generation, so stale keys fail to resolve instead of silently
    /// pointing at a replacement.
    pub struct RowKey;
}

impl RowKey {
    /// The raw representation carried in [`ModelIndex::internal_id`](super::ModelIndex::internal_id).
    #[inline]
    pub fn as_raw(self) -> u64 {
        self.data().as_ffi()
    }

    /// Reconstructs a key from its raw representation.
    #[inline]
    pub fn from_raw(raw: u64) -> Self {
        KeyData::from_ffi(raw).into()
    }
}

/// A durable reference to one grid cell.
///
/// Remains valid across row insertion and removal; when the referenced row
/// is removed the reference becomes invalid and every query through it
/// reflects that. Obtain one via
/// [`PieModel::persistent_index`](super::PieModel::persistent_index) and
/// resolve it back with [`PieModel::resolve`](super::PieModel::resolve).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PersistentIndex {
    key: RowKey,
    column: usize,
}

impl PersistentIndex {
    /// Creates a reference from a row key and column.
    pub(crate) fn new(key: RowKey, column: usize) -> Self {
        Self { key, column }
    }

    /// The stable key of the referenced row.
    #[inline]
    pub fn key(&self) -> RowKey {
        self.key
    }

    /// The referenced column.
    #[inline]
    pub fn column(&self) -> usize {
        self.column
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn test_row_key_raw_round_trip() {
        let mut slots: SlotMap<RowKey, ()> = SlotMap::with_key();
        let key = slots.insert(());
        assert_eq!(RowKey::from_raw(key.as_raw()), key);
    }

    #[test]
    fn test_removed_key_does_not_resolve() {
        let mut slots: SlotMap<RowKey, u32> = SlotMap::with_key();
        let key = slots.insert(1);
        slots.remove(key);
        let replacement = slots.insert(2);

        // The old key must not alias the slot's new occupant.
        assert!(!slots.contains_key(key));
        assert_ne!(key, replacement);
    }
}
