//! Index and slot storage behind every set.
//!
//! Live values sit in `slots` in insertion order and are located through
//! `index`. Removal leaves a `None` tombstone in place of the value so that
//! no shifting happens; tombstones are reclaimed in bulk by [`Storage::compact`]
//! once [`COMPACTION_THRESHOLD`] of them have accumulated.
//!
//! Invariants:
//! - for every `(value, position)` in `index`, `slots[position] == Some(value)`
//! - every `Some` slot has exactly one entry in `index`
//! - `tombstones` equals the number of `None` slots

use crate::element::Element;

/// Number of accumulated tombstones that triggers a compaction on removal.
pub const COMPACTION_THRESHOLD: usize = 1024;

#[cfg(feature = "fxhash")]
type IndexMap<T> = rustc_hash::FxHashMap<T, usize>;

#[cfg(not(feature = "fxhash"))]
type IndexMap<T> = std::collections::HashMap<T, usize>;

/// Insertion-ordered slot storage with a value index.
#[derive(Debug)]
pub struct Storage<T> {
    index: IndexMap<T>,
    slots: Vec<Option<T>>,
    tombstones: usize,
}

impl<T: Element> Storage<T> {
    pub(crate) fn new() -> Self {
        Self::with_capacity(0)
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            index: IndexMap::with_capacity_and_hasher(capacity, Default::default()),
            slots: Vec::with_capacity(capacity),
            tombstones: 0,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    #[inline]
    pub(crate) fn contains(&self, value: &T) -> bool {
        self.index.contains_key(value)
    }

    #[cfg(test)]
    pub(crate) const fn tombstones(&self) -> usize {
        self.tombstones
    }

    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Live values in insertion order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().flatten()
    }

    pub(crate) fn into_values(self) -> Vec<T> {
        self.slots.into_iter().flatten().collect()
    }

    /// Appends `value` after every existing slot unless it is already live.
    ///
    /// Tombstoned positions are never reused here; only compaction reclaims them.
    pub(crate) fn insert(&mut self, value: &T) -> bool {
        if self.index.contains_key(value) {
            return false;
        }
        self.index.insert(value.clone(), self.slots.len());
        self.slots.push(Some(value.clone()));
        true
    }

    /// Tombstones `value` if it is live.
    pub(crate) fn remove(&mut self, value: &T) -> bool {
        match self.index.remove(value) {
            Some(position) => {
                self.slots[position] = None;
                self.tombstones += 1;
                true
            }
            None => false,
        }
    }

    /// Compacts once the tombstone count reaches the threshold.
    ///
    /// Returns the number of reclaimed slots when a compaction ran.
    pub(crate) fn compact_if_needed(&mut self) -> Option<usize> {
        (self.tombstones >= COMPACTION_THRESHOLD).then(|| self.compact())
    }

    /// Rewrites the slots contiguously, keeping the relative order of live
    /// values, and repoints the index. Returns the number of reclaimed slots.
    pub(crate) fn compact(&mut self) -> usize {
        let reclaimed = self.slots.len() - self.index.len();
        let mut slots = Vec::with_capacity(self.index.len());
        for value in std::mem::take(&mut self.slots).into_iter().flatten() {
            if let Some(position) = self.index.get_mut(&value) {
                *position = slots.len();
            }
            slots.push(Some(value));
        }
        self.slots = slots;
        self.tombstones = 0;
        reclaimed
    }

    pub(crate) fn clear(&mut self) {
        self.index.clear();
        self.slots.clear();
        self.tombstones = 0;
    }

    /// Copy holding live values only, without tombstones.
    pub(crate) fn compacted(&self) -> Self {
        let mut copy = Self::with_capacity(self.len());
        for value in self.iter() {
            copy.insert(value);
        }
        copy
    }

    // =========================================================================
    // Set algebra over two storages
    // =========================================================================

    pub(crate) fn is_subset(&self, other: &Self) -> bool {
        if self.is_empty() {
            return true;
        }
        if self.len() > other.len() {
            return false;
        }
        self.iter().all(|value| other.contains(value))
    }

    pub(crate) fn overlaps(&self, other: &Self) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        let (smaller, larger) = Self::by_size(self, other);
        smaller.iter().any(|value| larger.contains(value))
    }

    /// Values present in both, in the insertion order of the smaller side.
    pub(crate) fn intersection(&self, other: &Self) -> Self {
        if self.is_empty() || other.is_empty() {
            return Self::new();
        }
        let (smaller, larger) = Self::by_size(self, other);
        let mut result = Self::with_capacity(smaller.len());
        for value in smaller.iter().filter(|value| larger.contains(value)) {
            result.insert(value);
        }
        result
    }

    #[inline]
    fn by_size<'a>(left: &'a Self, right: &'a Self) -> (&'a Self, &'a Self) {
        if left.len() <= right.len() {
            (left, right)
        } else {
            (right, left)
        }
    }

    #[cfg(test)]
    pub(crate) fn check_invariants(&self) -> bool {
        let indexed = self
            .index
            .iter()
            .all(|(value, &position)| self.slots.get(position) == Some(&Some(value.clone())));
        let holes = self.slots.iter().filter(|slot| slot.is_none()).count();
        indexed && holes == self.tombstones && self.slots.len() - holes == self.index.len()
    }
}
