use std::collections::HashMap;
use std::hash::Hash;

/// Set of handles that iterates in a stable order.
///
/// Removal swaps the last element into the hole, so iteration order is
/// insertion order until the first removal.
pub struct HandleSet<T> {
    handles: Vec<T>,
    slots: HashMap<T, usize>,
}

impl<T: Eq + Hash + Copy> HandleSet<T> {
    pub fn new() -> Self {
        HandleSet {
            handles: Vec::new(),
            slots: HashMap::new(),
        }
    }

    /// Returns false if the handle was already present.
    pub fn insert(&mut self, handle: T) -> bool {
        if self.slots.contains_key(&handle) {
            return false;
        }
        self.slots.insert(handle, self.handles.len());
        self.handles.push(handle);
        true
    }

    /// Returns false if the handle was not present.
    pub fn remove(&mut self, handle: T) -> bool {
        let slot = match self.slots.remove(&handle) {
            Some(slot) => slot,
            None => return false,
        };
        self.handles.swap_remove(slot);
        if let Some(&moved) = self.handles.get(slot) {
            self.slots.insert(moved, slot);
        }
        true
    }

    pub fn contains(&self, handle: T) -> bool {
        self.slots.contains_key(&handle)
    }

    pub fn iter(&self) -> std::slice::Iter<T> {
        self.handles.iter()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl<T: Eq + Hash + Copy> Default for HandleSet<T> {
    fn default() -> Self {
        HandleSet::new()
    }
}
