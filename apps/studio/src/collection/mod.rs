//! Ordered, mutable lists of entries with stable ids.
//!
//! Storage keeps every entry, including ones that are still blank, so an
//! in-progress edit is never lost. `collect()` is where the presence rule is
//! applied: it returns only what a projection may show.

pub mod tags;

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Presence;

pub use tags::TagCollection;

/// Stable identity of one entry inside a collection. Survives reordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Converts an editable entry into the value the Document stores.
pub trait CollectEntry {
    type Output: Presence;

    fn snapshot(&self) -> Self::Output;
}

impl CollectEntry for String {
    type Output = String;

    fn snapshot(&self) -> String {
        self.trim().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slot<T> {
    pub id: EntryId,
    pub value: T,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Collection<T> {
    slots: Vec<Slot<T>>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<T> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: impl IntoIterator<Item = T>) -> Self {
        let mut collection = Self::new();
        for value in values {
            collection.add(value);
        }
        collection
    }

    /// Appends `value` and returns its id.
    pub fn add(&mut self, value: T) -> EntryId {
        self.add_at(value, true)
    }

    /// Appends (`at_end`) or prepends `value` and returns its id.
    pub fn add_at(&mut self, value: T, at_end: bool) -> EntryId {
        let id = EntryId::new();
        let slot = Slot { id, value };
        if at_end {
            self.slots.push(slot);
        } else {
            self.slots.insert(0, slot);
        }
        id
    }

    /// Removes the entry with `id`. Absent ids are a no-op.
    pub fn remove(&mut self, id: EntryId) -> Option<T> {
        let index = self.position(id)?;
        Some(self.slots.remove(index).value)
    }

    /// Swaps the entry with its predecessor. Returns whether anything moved.
    pub fn move_up(&mut self, id: EntryId) -> bool {
        match self.position(id) {
            Some(index) if index > 0 => {
                self.slots.swap(index, index - 1);
                true
            }
            _ => false,
        }
    }

    /// Swaps the entry with its successor. Returns whether anything moved.
    pub fn move_down(&mut self, id: EntryId) -> bool {
        match self.position(id) {
            Some(index) if index + 1 < self.slots.len() => {
                self.slots.swap(index, index + 1);
                true
            }
            _ => false,
        }
    }

    pub fn position(&self, id: EntryId) -> Option<usize> {
        self.slots.iter().position(|slot| slot.id == id)
    }

    pub fn contains(&self, id: EntryId) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: EntryId) -> Option<&T> {
        self.slots.iter().find(|slot| slot.id == id).map(|slot| &slot.value)
    }

    pub fn get_mut(&mut self, id: EntryId) -> Option<&mut T> {
        self.slots
            .iter_mut()
            .find(|slot| slot.id == id)
            .map(|slot| &mut slot.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slot<T>> {
        self.slots.iter()
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().map(|slot| &slot.value)
    }

    pub fn ids(&self) -> Vec<EntryId> {
        self.slots.iter().map(|slot| slot.id).collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

impl<T: CollectEntry> Collection<T> {
    /// Ordered snapshot of the entries that pass the presence rule.
    pub fn collect(&self) -> Vec<T::Output> {
        self.values()
            .map(CollectEntry::snapshot)
            .filter(Presence::is_present)
            .collect()
    }
}
