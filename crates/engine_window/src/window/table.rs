//! Window table with per-field change tracking
//!
//! The table is the engine-facing store of [`WindowRecord`]s. Edits made
//! through the tracked setters raise an "updated" flag for the field; the
//! backend consumes those flags on its next tick and pushes the change to the
//! OS window. Notification flags raised by the backend itself (`NATIVE`,
//! `SWAP_CHAIN`) are cleared by [`WindowTable::end_tick`]. Writes that
//! mirror state the OS already reported go through the raw accessors and
//! raise nothing, so they are never echoed back.

use bitflags::bitflags;
use slotmap::{new_key_type, SlotMap};

use super::geometry::Size;
use super::record::WindowRecord;

new_key_type! {
    /// Stable identifier of a window table entry
    pub struct WindowId;
}

bitflags! {
    /// Tracked fields of a [`WindowRecord`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct WindowFields: u8 {
        /// `title`
        const TITLE = 1 << 0;
        /// `width` / `height`
        const SIZE = 1 << 1;
        /// `decorated`
        const DECORATED = 1 << 2;
        /// `native` became present
        const NATIVE = 1 << 3;
        /// `surface`
        const SURFACE = 1 << 4;
        /// `swap_chain` was recreated
        const SWAP_CHAIN = 1 << 5;
    }
}

impl WindowFields {
    /// Engine edits the backend pushes to the OS window
    pub const OUTBOUND: Self = Self::TITLE.union(Self::SIZE).union(Self::DECORATED);
}

#[derive(Debug)]
struct Entry {
    record: WindowRecord,
    updated: WindowFields,
}

/// Key-value store of window records
#[derive(Debug, Default)]
pub struct WindowTable {
    entries: SlotMap<WindowId, Entry>,
}

impl WindowTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a window; it is created natively on the backend's next tick
    pub fn insert(&mut self, record: WindowRecord) -> WindowId {
        self.entries.insert(Entry {
            record,
            updated: WindowFields::empty(),
        })
    }

    /// Remove a window record
    pub fn remove(&mut self, id: WindowId) -> Option<WindowRecord> {
        self.entries.remove(id).map(|entry| entry.record)
    }

    /// Whether `id` names a live entry
    pub fn contains(&self, id: WindowId) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of windows
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the table holds no windows
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Identifiers of all live windows
    pub fn ids(&self) -> impl Iterator<Item = WindowId> + '_ {
        self.entries.keys()
    }

    /// Read a window record
    pub fn get(&self, id: WindowId) -> Option<&WindowRecord> {
        self.entries.get(id).map(|entry| &entry.record)
    }

    /// Mutable access that does not raise any updated flag
    pub fn get_mut_raw(&mut self, id: WindowId) -> Option<&mut WindowRecord> {
        self.entries.get_mut(id).map(|entry| &mut entry.record)
    }

    /// Replace a record without raising any updated flag
    ///
    /// Returns the previous record, or `None` (and drops `record`) if `id` is
    /// not live.
    pub fn set_value_raw(&mut self, id: WindowId, record: WindowRecord) -> Option<WindowRecord> {
        self.entries
            .get_mut(id)
            .map(|entry| std::mem::replace(&mut entry.record, record))
    }

    /// Change the title
    pub fn set_title(&mut self, id: WindowId, title: impl Into<String>) -> bool {
        let title = title.into();
        self.update(id, WindowFields::TITLE, |record| {
            if record.title == title {
                false
            } else {
                record.title = title;
                true
            }
        })
    }

    /// Request a new client size
    pub fn set_size(&mut self, id: WindowId, size: Size) -> bool {
        self.update(id, WindowFields::SIZE, |record| {
            if record.size() == size {
                false
            } else {
                record.width = size.width;
                record.height = size.height;
                true
            }
        })
    }

    /// Show or hide the frame
    pub fn set_decorated(&mut self, id: WindowId, decorated: bool) -> bool {
        self.update(id, WindowFields::DECORATED, |record| {
            if record.decorated == decorated {
                false
            } else {
                record.decorated = decorated;
                true
            }
        })
    }

    /// Raise updated flags without changing the record
    pub fn mark_updated(&mut self, id: WindowId, fields: WindowFields) {
        if let Some(entry) = self.entries.get_mut(id) {
            entry.updated |= fields;
        }
    }

    /// Whether `field` changed since it was last consumed, clearing the flag
    pub fn updated(&mut self, id: WindowId, field: WindowFields) -> bool {
        self.entries.get_mut(id).is_some_and(|entry| {
            let was_set = entry.updated.intersects(field);
            entry.updated.remove(field);
            was_set
        })
    }

    /// Whether `field` changed since it was last consumed, leaving the flag
    pub fn is_updated(&self, id: WindowId, field: WindowFields) -> bool {
        self.entries
            .get(id)
            .is_some_and(|entry| entry.updated.intersects(field))
    }

    /// Drop notification flags once every system has seen them
    ///
    /// [`WindowFields::OUTBOUND`] requests stay raised until the backend
    /// consumes them, so edits made after the backend's tick are not lost.
    pub fn end_tick(&mut self) {
        for entry in self.entries.values_mut() {
            entry.updated &= WindowFields::OUTBOUND;
        }
    }

    fn update(&mut self, id: WindowId, field: WindowFields, apply: impl FnOnce(&mut WindowRecord) -> bool) -> bool {
        let Some(entry) = self.entries.get_mut(id) else {
            return false;
        };
        let changed = apply(&mut entry.record);
        if changed {
            entry.updated |= field;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_iterate() {
        let mut table = WindowTable::new();
        let a = table.insert(WindowRecord::new("a", 100, 100));
        let b = table.insert(WindowRecord::new("b", 200, 200));
        let ids: Vec<_> = table.ids().collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&a) && ids.contains(&b));
        assert_eq!(table.get(b).map(|record| record.width), Some(200));
    }

    #[test]
    fn test_tracked_setter_raises_flag_once() {
        let mut table = WindowTable::new();
        let id = table.insert(WindowRecord::new("a", 100, 100));
        assert!(table.set_title(id, "renamed"));
        assert!(table.is_updated(id, WindowFields::TITLE));
        assert!(table.updated(id, WindowFields::TITLE));
        assert!(!table.updated(id, WindowFields::TITLE));
        assert_eq!(table.get(id).map(|record| record.title.as_str()), Some("renamed"));
    }

    #[test]
    fn test_unchanged_value_raises_nothing() {
        let mut table = WindowTable::new();
        let id = table.insert(WindowRecord::new("a", 100, 100));
        assert!(!table.set_size(id, Size::new(100, 100)));
        assert!(!table.set_decorated(id, true));
        assert!(!table.is_updated(id, WindowFields::all()));
    }

    #[test]
    fn test_raw_writes_do_not_track() {
        let mut table = WindowTable::new();
        let id = table.insert(WindowRecord::new("a", 100, 100));
        if let Some(record) = table.get_mut_raw(id) {
            record.width = 640;
        }
        let previous = table.set_value_raw(id, WindowRecord::new("b", 1, 1));
        assert_eq!(previous.map(|record| record.width), Some(640));
        assert!(!table.is_updated(id, WindowFields::all()));
    }

    #[test]
    fn test_removed_ids_are_dead() {
        let mut table = WindowTable::new();
        let id = table.insert(WindowRecord::new("a", 100, 100));
        assert!(table.remove(id).is_some());
        assert!(!table.contains(id));
        assert!(!table.set_title(id, "ghost"));
        assert!(table.set_value_raw(id, WindowRecord::new("b", 1, 1)).is_none());
        assert!(table.is_empty());
    }

    #[test]
    fn test_end_tick() {
        let mut table = WindowTable::new();
        let id = table.insert(WindowRecord::new("a", 100, 100));
        table.set_size(id, Size::new(300, 200));
        table.mark_updated(id, WindowFields::SURFACE);
        table.end_tick();
        assert!(!table.is_updated(id, WindowFields::SURFACE));
        assert!(table.updated(id, WindowFields::SIZE));
        table.end_tick();
        assert!(!table.is_updated(id, WindowFields::all()));
    }
}
