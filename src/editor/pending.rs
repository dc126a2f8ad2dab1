//! # Pending-Edit Tracker
//!
//! Ids of the posts whose rows are currently in inline-edit mode, in the order editing
//! started. Membership is a set: starting an edit twice is a no-op, and one cancel
//! always ends the edit.

use indexmap::IndexSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingEdits {
    ids: IndexSet<String>,
}

impl PendingEdits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts `id` in edit mode. Returns `false` if it already was.
    pub fn start(&mut self, id: impl Into<String>) -> bool {
        self.ids.insert(id.into())
    }

    /// Takes `id` out of edit mode. Returns `false` if it wasn't editing.
    pub fn cancel(&mut self, id: &str) -> bool {
        self.ids.shift_remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }
}
