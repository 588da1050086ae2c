//! Null-object operations on a set that may not exist yet.
//!
//! A set that has not been constructed is represented as `None`. Through
//! [`OptionSetExt`] it answers every query as an empty, read-only set
//! without locking or allocating, and mutations on it are no-ops. Use
//! `Option::as_ref` to view an owned `Option<Set<_>>` this way.
//!
//! A `None` set has no element type, so it is neither a subset nor a
//! superset of anything, and overlaps nothing.
//!
//! # Examples
//!
//! ```rust
//! use homoset::prelude::*;
//!
//! let missing: Option<GuardedSet<i32>> = None;
//! let set = missing.as_ref();
//!
//! assert!(set.is_empty());
//! assert_eq!(set.len(), 0);
//! assert!(!set.contains(&1));
//! assert!(set.add(1).to_vec().is_empty());
//! ```

use super::{Guard, Set};
use crate::element::Element;

/// Set operations on `Option<&Set<T, G>>`, treating `None` as an empty set.
pub trait OptionSetExt<T: Element, G: Guard<T>> {
    /// Number of live members, `0` for `None`.
    fn len(&self) -> usize;

    /// Returns `true` for `None` or an empty set.
    fn is_empty(&self) -> bool;

    /// Returns `false` for `None`.
    fn contains(&self, value: &T) -> bool;

    /// Live members in insertion order, empty for `None`.
    fn to_vec(&self) -> Vec<T>;

    /// Adds `value` to a present set.
    #[must_use]
    fn add(self, value: T) -> Self;

    /// Adds `values` to a present set.
    #[must_use]
    fn add_all<I: IntoIterator<Item = T>>(self, values: I) -> Self;

    /// Removes `value` from a present set.
    #[must_use]
    fn remove(self, value: &T) -> Self;

    /// Removes `values` from a present set.
    #[must_use]
    fn remove_all<'a, I: IntoIterator<Item = &'a T>>(self, values: I) -> Self
    where
        T: 'a;

    /// Subset test; `false` if either side is `None`.
    fn is_subset_of<H: Guard<T>>(&self, other: Option<&Set<T, H>>) -> bool;

    /// Superset test; `false` if either side is `None`.
    fn is_superset_of<H: Guard<T>>(&self, other: Option<&Set<T, H>>) -> bool;

    /// Overlap test; `false` if either side is `None`.
    fn overlaps<H: Guard<T>>(&self, other: Option<&Set<T, H>>) -> bool;

    /// Intersection; `None` for a `None` receiver, and an empty set of the
    /// receiver's element type when only `other` is `None`.
    fn intersection<H: Guard<T>>(&self, other: Option<&Set<T, H>>) -> Option<Set<T, G>>;
}

impl<T: Element, G: Guard<T>> OptionSetExt<T, G> for Option<&Set<T, G>> {
    fn len(&self) -> usize {
        self.map_or(0, Set::len)
    }

    fn is_empty(&self) -> bool {
        self.is_none_or(Set::is_empty)
    }

    fn contains(&self, value: &T) -> bool {
        self.is_some_and(|set| set.contains(value))
    }

    fn to_vec(&self) -> Vec<T> {
        self.map_or_else(Vec::new, Set::to_vec)
    }

    fn add(self, value: T) -> Self {
        self.map(|set| set.add(value))
    }

    fn add_all<I: IntoIterator<Item = T>>(self, values: I) -> Self {
        self.map(|set| set.add_all(values))
    }

    fn remove(self, value: &T) -> Self {
        self.map(|set| set.remove(value))
    }

    fn remove_all<'a, I: IntoIterator<Item = &'a T>>(self, values: I) -> Self
    where
        T: 'a,
    {
        self.map(|set| set.remove_all(values))
    }

    fn is_subset_of<H: Guard<T>>(&self, other: Option<&Set<T, H>>) -> bool {
        matches!((self, other), (Some(set), Some(other)) if set.is_subset_of(other))
    }

    fn is_superset_of<H: Guard<T>>(&self, other: Option<&Set<T, H>>) -> bool {
        other.is_subset_of(*self)
    }

    fn overlaps<H: Guard<T>>(&self, other: Option<&Set<T, H>>) -> bool {
        matches!((self, other), (Some(set), Some(other)) if set.overlaps(other))
    }

    fn intersection<H: Guard<T>>(&self, other: Option<&Set<T, H>>) -> Option<Set<T, G>> {
        self.map(|set| match other {
            Some(other) => set.intersection(other),
            None => Set::with_element_type(set.element_type()),
        })
    }
}
