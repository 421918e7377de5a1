//! Append-only slot storage with stable indices.
//!
//! Removing an element leaves an empty slot behind; indices are never
//! shifted or reused, so handles built from them stay valid for the lifetime
//! of the arena.

#[derive(Debug, Clone)]
pub struct Arena<T> {
    slots: Vec<Option<T>>,
    live: usize,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            live: 0,
        }
    }

    /// Stores `value` and returns its slot index.
    pub fn insert(&mut self, value: T) -> u32 {
        let index = self.slots.len() as u32;
        self.slots.push(Some(value));
        self.live += 1;
        index
    }

    pub fn get(&self, index: u32) -> Option<&T> {
        self.slots.get(index as usize).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, index: u32) -> Option<&mut T> {
        self.slots.get_mut(index as usize).and_then(Option::as_mut)
    }

    /// Removes every element for which `keep` returns false and returns how
    /// many were removed.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let mut removed = 0;
        for slot in &mut self.slots {
            if slot.as_ref().is_some_and(|value| !keep(value)) {
                *slot = None;
                removed += 1;
            }
        }
        self.live -= removed;
        removed
    }

    /// Live elements in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|value| (i as u32, value)))
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_survive_removal() {
        let mut arena = Arena::new();
        let a = arena.insert("a");
        let b = arena.insert("b");
        let c = arena.insert("c");

        assert_eq!(arena.retain(|v| *v != "b"), 1);
        assert_eq!(arena.get(a), Some(&"a"));
        assert_eq!(arena.get(b), None);
        assert_eq!(arena.get(c), Some(&"c"));
        assert_eq!(arena.len(), 2);

        // New values never take over a freed slot.
        let d = arena.insert("d");
        assert_eq!(d, 3);
    }

    #[test]
    fn test_retain_counts_removed() {
        let mut arena = Arena::new();
        for value in 0..6 {
            arena.insert(value);
        }
        let removed = arena.retain(|v| v % 2 == 0);
        assert_eq!(removed, 3);
        assert_eq!(arena.len(), 3);
        let kept: Vec<_> = arena.iter().map(|(i, v)| (i, *v)).collect();
        assert_eq!(kept, vec![(0, 0), (2, 2), (4, 4)]);
    }
}
