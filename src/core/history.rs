//! Bounded in-memory view of a board's entries.
//!
//! The store is a display window over server truth, never authoritative:
//! it is rebuilt wholesale from every full snapshot and capped at
//! [`HISTORY_CAP`] visible entries. Evicting an entry here is purely a
//! display decision and never asks the service to delete anything.

use crate::message::{BoardSnapshot, Entry, EntryId};

/// Maximum number of entries kept visible.
pub const HISTORY_CAP: usize = 5;

#[derive(Debug, Default)]
pub struct BoundedHistoryStore {
    entries: Vec<Entry>,
}

impl BoundedHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wholesale replacement from a snapshot, in snapshot order,
    /// truncated to the cap. Duplicate ids keep their first occurrence.
    pub fn replace(&mut self, snapshot: &BoardSnapshot) {
        self.entries.clear();
        for entry in &snapshot.entries {
            if self.entries.len() == HISTORY_CAP {
                break;
            }
            if self.contains(&entry.id) {
                continue;
            }
            self.entries.push(entry.clone());
        }
    }

    /// Inserts a confirmed entry at the front so it displays newest-first,
    /// then trims the tail back to the cap. Returns the evicted ids so the
    /// render side can drop exactly those rows.
    pub fn prepend(&mut self, entry: Entry) -> Vec<EntryId> {
        self.entries.retain(|existing| existing.id != entry.id);
        self.entries.insert(0, entry);
        // 只保留最前面的 HISTORY_CAP 条
        if self.entries.len() > HISTORY_CAP {
            self.entries
                .split_off(HISTORY_CAP)
                .into_iter()
                .map(|evicted| evicted.id)
                .collect()
        } else {
            Vec::new()
        }
    }

    /// Removes by id; a no-op when the id is not displayed.
    pub fn remove(&mut self, id: &EntryId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| &entry.id != id);
        self.entries.len() != before
    }

    pub fn contains(&self, id: &EntryId) -> bool {
        self.entries.iter().any(|entry| &entry.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Cloned view of the visible entries, newest first.
    pub fn entries(&self) -> Vec<Entry> {
        self.entries.clone()
    }
}
