use serde::Serialize;

use crate::collection::{Collection, EntryId};

/// Tag-style collection (skills, project tech): values are trimmed, never
/// empty, and unique by exact, case-sensitive match.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TagCollection {
    tags: Collection<String>,
}

impl TagCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds from stored values, silently dropping blanks and repeats.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tags = Self::new();
        for value in values {
            tags.add(value.as_ref());
        }
        tags
    }

    /// Adds `value` unless it is blank or already present.
    pub fn add(&mut self, value: &str) -> Option<EntryId> {
        let value = value.trim();
        if value.is_empty() || self.contains(value) {
            return None;
        }
        Some(self.tags.add(value.to_string()))
    }

    /// Adds the value when absent, removes it when present. Returns whether
    /// the value is present afterwards.
    pub fn toggle(&mut self, value: &str) -> bool {
        if self.remove_by_value(value) {
            false
        } else {
            self.add(value).is_some()
        }
    }

    pub fn remove_by_value(&mut self, value: &str) -> bool {
        let value = value.trim();
        let id = self.tags.iter().find(|slot| slot.value == value).map(|slot| slot.id);
        match id {
            Some(id) => self.tags.remove(id).is_some(),
            None => false,
        }
    }

    pub fn remove(&mut self, id: EntryId) -> Option<String> {
        self.tags.remove(id)
    }

    pub fn move_up(&mut self, id: EntryId) -> bool {
        self.tags.move_up(id)
    }

    pub fn move_down(&mut self, id: EntryId) -> bool {
        self.tags.move_down(id)
    }

    pub fn contains(&self, value: &str) -> bool {
        let value = value.trim();
        self.tags.values().any(|tag| tag == value)
    }

    pub fn values(&self) -> impl Iterator<Item = &String> {
        self.tags.values()
    }

    pub fn ids(&self) -> Vec<EntryId> {
        self.tags.ids()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn collect(&self) -> Vec<String> {
        self.tags.collect()
    }
}
