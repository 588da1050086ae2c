//! Type-homogeneous, insertion-ordered sets with selectable locking.
//!
//! [`Set`] stores unique values of one element type, fixed at construction
//! from a sample value. Insertion order is preserved; removal tombstones a
//! slot instead of shifting, and the holes are reclaimed by a compaction pass
//! once [`COMPACTION_THRESHOLD`] of them have accumulated.
//!
//! - [`GuardedSet`]: every operation takes a reader/writer lock. Shareable
//!   between threads.
//! - [`UnguardedSet`]: no locking, confined to one thread by the compiler.
//!
//! Only construction can fail. Afterwards every operation is total: a value
//! of the wrong element type is "not a member", and adding or removing it is
//! a no-op.
//!
//! # Time Complexity
//!
//! | Operation        | Complexity                          |
//! |------------------|-------------------------------------|
//! | `add`            | O(1) amortized                      |
//! | `remove`         | O(1) amortized (O(n) on compaction) |
//! | `contains`       | O(1) average                        |
//! | `len`/`is_empty` | O(1)                                |
//! | `is_subset_of`   | O(len(self))                        |
//! | `overlaps`       | O(min(n, m))                        |
//! | `intersection`   | O(min(n, m))                        |
//! | `to_vec`/`clone` | O(n)                                |
//!
//! # Examples
//!
//! ```rust
//! use homoset::prelude::*;
//!
//! let set = GuardedSet::from_values(&0, [1, 2, 3]).unwrap();
//! set.add(2);
//! assert_eq!(set.len(), 3);
//!
//! set.remove(&2);
//! assert_eq!(set.to_vec(), vec![1, 3]);
//!
//! // Re-adding goes to the back
//! set.add(2);
//! assert_eq!(set.to_vec(), vec![1, 3, 2]);
//! ```

mod guard;
mod nullable;
mod storage;

pub use guard::{Guard, Locked, Mode, Unlocked};
pub use nullable::OptionSetExt;
pub use storage::COMPACTION_THRESHOLD;

use std::fmt;
use std::marker::PhantomData;

use guard::sealed::Sealed;
use storage::Storage;

use crate::element::{Element, ElementType};
use crate::error::ConstructionError;

/// A set that locks on every operation.
pub type GuardedSet<T> = Set<T, Locked<T>>;

/// A set without internal synchronization.
pub type UnguardedSet<T> = Set<T, Unlocked<T>>;

/// A type-homogeneous, insertion-ordered set.
///
/// Mutating operations take `&self` and return `&Self`, so a set can be
/// shared (behind an `Arc` for [`GuardedSet`]) and updated fluently.
///
/// # Type Parameters
///
/// * `T` - The element type. Must implement [`Element`].
/// * `G` - The concurrency guard, [`Locked`] (default) or [`Unlocked`].
///
/// # Examples
///
/// ```rust
/// use homoset::prelude::*;
/// use std::sync::Arc;
/// use std::thread;
///
/// let set = Arc::new(GuardedSet::new(&0_u32).unwrap());
/// let handles: Vec<_> = (0..4)
///     .map(|worker| {
///         let set = Arc::clone(&set);
///         thread::spawn(move || {
///             set.add_all(worker * 10..worker * 10 + 10);
///         })
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
/// assert_eq!(set.len(), 40);
/// ```
pub struct Set<T: Element, G: Guard<T> = Locked<T>> {
    element_type: ElementType,
    guard: G,
    marker: PhantomData<T>,
}

// Guarded sets cross threads freely; unguarded ones may move but not be shared
static_assertions::assert_impl_all!(GuardedSet<i32>: Send, Sync);
static_assertions::assert_impl_all!(GuardedSet<crate::value::Value>: Send, Sync);
static_assertions::assert_impl_all!(UnguardedSet<String>: Send);
static_assertions::assert_not_impl_any!(UnguardedSet<String>: Sync);

impl<T: Element, G: Guard<T>> Set<T, G> {
    /// Creates an empty set whose element type is the type of `sample`.
    ///
    /// The sample itself is not inserted.
    ///
    /// # Errors
    ///
    /// - [`ConstructionError::NotEquatable`] if the sample's type has no total
    ///   equality
    /// - [`ConstructionError::IdentityTypeNotAllowed`] if the sample's type
    ///   compares by identity
    ///
    /// # Examples
    ///
    /// ```rust
    /// use homoset::prelude::*;
    ///
    /// let names = UnguardedSet::new(&String::new()).unwrap();
    /// assert!(names.is_empty());
    /// assert_eq!(names.mode(), Mode::Unguarded);
    ///
    /// let floats = GuardedSet::new(&Value::Float32(0.5));
    /// assert!(matches!(floats, Err(ConstructionError::NotEquatable { .. })));
    /// ```
    pub fn new(sample: &T) -> Result<Self, ConstructionError> {
        let element_type = sample.element_type();
        if let Err(error) = element_type.validate() {
            tracing::debug!(element_type = element_type.name(), %error, "rejected set element type");
            return Err(error);
        }
        Ok(Self::with_element_type(element_type))
    }

    /// Creates a set from `sample`'s type and adds `values` to it.
    ///
    /// # Errors
    ///
    /// Same as [`Set::new`].
    pub fn from_values<I>(sample: &T, values: I) -> Result<Self, ConstructionError>
    where
        I: IntoIterator<Item = T>,
    {
        let set = Self::new(sample)?;
        set.add_all(values);
        Ok(set)
    }

    /// Empty set of an element type already validated by its origin set.
    pub(crate) fn with_element_type(element_type: ElementType) -> Self {
        Self::from_storage(element_type, Storage::new())
    }

    fn from_storage(element_type: ElementType, storage: Storage<T>) -> Self {
        Self {
            element_type,
            guard: G::wrap(storage),
            marker: PhantomData,
        }
    }

    /// Element type fixed at construction.
    #[inline]
    pub const fn element_type(&self) -> ElementType {
        self.element_type
    }

    /// Concurrency mode of this set.
    #[inline]
    pub const fn mode(&self) -> Mode {
        G::MODE
    }

    /// Number of live members.
    pub fn len(&self) -> usize {
        self.guard.read(Storage::len)
    }

    /// Returns `true` if the set has no live members.
    pub fn is_empty(&self) -> bool {
        self.guard.read(Storage::is_empty)
    }

    /// Returns `true` if `value` is a member.
    ///
    /// A value of another element type is never a member; this is decided
    /// without locking.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use homoset::prelude::*;
    ///
    /// let set = GuardedSet::from_values(&Value::Int64(0), [Value::Int64(1)]).unwrap();
    /// assert!(set.contains(&Value::Int64(1)));
    /// assert!(!set.contains(&Value::Int32(1)));
    /// ```
    pub fn contains(&self, value: &T) -> bool {
        self.accepts(value) && self.guard.read(|storage| storage.contains(value))
    }

    #[inline]
    fn accepts(&self, value: &T) -> bool {
        value.element_type() == self.element_type
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Adds `value`, or each item of `value` if it is a batch.
    ///
    /// Duplicates and absent values are ignored. If any item has another
    /// element type the whole call is ignored.
    pub fn add(&self, value: T) -> &Self {
        if value.batch().is_some() {
            return self.add_all(std::iter::once(value));
        }
        if !value.is_absent() && !self.rejects(std::iter::once(&value), "add") {
            self.guard.write(|storage| storage.insert(&value));
        }
        self
    }

    /// Adds every value of `values`, flattening batches.
    ///
    /// New values are appended in iteration order. If any item has another
    /// element type the whole call is ignored.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use homoset::prelude::*;
    ///
    /// let set = GuardedSet::new(&Value::Int64(0)).unwrap();
    /// set.add(Value::List(vec![Value::Int64(1), Value::Nil, Value::Int64(2)]));
    /// assert_eq!(set.len(), 2);
    ///
    /// // One mismatched item voids the call
    /// set.add_all([Value::Int64(3), Value::from("three")]);
    /// assert_eq!(set.len(), 2);
    /// ```
    pub fn add_all<I>(&self, values: I) -> &Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut items = Vec::new();
        for value in values {
            if let Some(batch) = value.batch() {
                items.extend(batch.iter().filter(|item| !item.is_absent()).cloned());
            } else if !value.is_absent() {
                items.push(value);
            }
        }
        if items.is_empty() || self.rejects(items.iter(), "add") {
            return self;
        }
        self.guard.write(|storage| {
            for item in &items {
                storage.insert(item);
            }
        });
        self
    }

    /// Removes `value`, or each item of `value` if it is a batch.
    ///
    /// Absent members and absent values are ignored. If any item has
    /// another element type the whole call is ignored.
    pub fn remove(&self, value: &T) -> &Self {
        if value.batch().is_some() {
            return self.remove_all(std::iter::once(value));
        }
        if !value.is_absent() && !self.rejects(std::iter::once(value), "remove") {
            self.tombstone(std::iter::once(value));
        }
        self
    }

    /// Removes every value of `values`, flattening batches.
    ///
    /// Removed slots become tombstones; when [`COMPACTION_THRESHOLD`] of them
    /// have accumulated the storage is compacted before the call returns.
    pub fn remove_all<'a, I>(&self, values: I) -> &Self
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let mut items = Vec::new();
        for value in values {
            match value.batch() {
                Some(batch) => items.extend(batch.iter().filter(|item| !item.is_absent())),
                None if !value.is_absent() => items.push(value),
                None => {}
            }
        }
        if !items.is_empty() && !self.rejects(items.iter().copied(), "remove") {
            self.tombstone(items);
        }
        self
    }

    /// Removes already validated `items` under one write lock, then compacts
    /// if the tombstone threshold was reached.
    fn tombstone<'a>(&self, items: impl IntoIterator<Item = &'a T>)
    where
        T: 'a,
    {
        let compaction = self.guard.write(|storage| {
            for item in items {
                storage.remove(item);
            }
            storage
                .compact_if_needed()
                .map(|reclaimed| (reclaimed, storage.len()))
        });
        if let Some((reclaimed, live)) = compaction {
            tracing::debug!(
                element_type = self.element_type.name(),
                reclaimed,
                live,
                "compacted set storage"
            );
        }
    }

    fn rejects<'a>(&self, mut items: impl Iterator<Item = &'a T>, operation: &'static str) -> bool
    where
        T: 'a,
    {
        match items.find(|item| !self.accepts(item)) {
            Some(stray) => {
                tracing::trace!(
                    operation,
                    expected = self.element_type.name(),
                    found = stray.element_type().name(),
                    "ignored call with mismatched element type"
                );
                true
            }
            None => false,
        }
    }

    /// Removes every member in place, keeping the element type and mode.
    pub fn clear(&self) -> &Self {
        self.guard.write(Storage::clear);
        self
    }

    /// Empties the set and returns it in guarded mode.
    ///
    /// This consumes the set, so it is not available through a shared
    /// `Arc<GuardedSet<T>>`; use [`Set::clear`] to reset a shared set in place.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use homoset::prelude::*;
    ///
    /// let scratch = UnguardedSet::from_values(&0, [1, 2]).unwrap();
    /// let shared: GuardedSet<i32> = scratch.reset();
    /// assert!(shared.is_empty());
    /// assert_eq!(shared.mode(), Mode::Guarded);
    ///
    /// // Behind an `Arc`, clear in place instead
    /// let pooled = std::sync::Arc::new(GuardedSet::from_values(&0, [1, 2]).unwrap());
    /// pooled.clear();
    /// assert!(pooled.is_empty());
    /// ```
    #[must_use]
    pub fn reset(self) -> GuardedSet<T> {
        GuardedSet::with_element_type(self.element_type)
    }

    // =========================================================================
    // Set algebra
    // =========================================================================

    /// Returns `true` if every member of `self` is a member of `other`.
    ///
    /// Sets of different element types are never subsets of one another. An
    /// empty set is a subset of any set of its element type.
    pub fn is_subset_of<H: Guard<T>>(&self, other: &Set<T, H>) -> bool {
        self.element_type == other.element_type
            && self.guard.read(|mine| other.guard.read(|theirs| mine.is_subset(theirs)))
    }

    /// Returns `true` if every member of `other` is a member of `self`.
    pub fn is_superset_of<H: Guard<T>>(&self, other: &Set<T, H>) -> bool {
        other.is_subset_of(self)
    }

    /// Returns `true` if the sets share at least one member.
    ///
    /// Iterates the smaller set and looks each member up in the larger one.
    pub fn overlaps<H: Guard<T>>(&self, other: &Set<T, H>) -> bool {
        self.element_type == other.element_type
            && self.guard.read(|mine| other.guard.read(|theirs| mine.overlaps(theirs)))
    }

    /// Returns a new set holding the members common to both sets.
    ///
    /// The result has the element type and mode of `self` and is empty when
    /// either input is empty or the element types differ.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use homoset::prelude::*;
    ///
    /// let left = GuardedSet::from_values(&0, [1, 2, 3, 4]).unwrap();
    /// let right = UnguardedSet::from_values(&0, [4, 2, 8]).unwrap();
    /// assert_eq!(left.intersection(&right).to_vec(), vec![4, 2]);
    /// ```
    #[must_use]
    pub fn intersection<H: Guard<T>>(&self, other: &Set<T, H>) -> Self {
        if self.element_type != other.element_type {
            return Self::with_element_type(self.element_type);
        }
        let storage = self
            .guard
            .read(|mine| other.guard.read(|theirs| mine.intersection(theirs)));
        Self::from_storage(self.element_type, storage)
    }

    // =========================================================================
    // Snapshots and copies
    // =========================================================================

    /// Live members in insertion order.
    pub fn to_vec(&self) -> Vec<T> {
        self.guard.read(|storage| storage.iter().cloned().collect())
    }

    /// Consumes the set, returning its live members in insertion order.
    pub fn into_vec(self) -> Vec<T> {
        self.guard.into_storage().into_values()
    }

    /// Independent copy in the mode chosen by `H`.
    ///
    /// The copy holds live members only; tombstones are not carried over.
    #[must_use]
    pub fn clone_as<H: Guard<T>>(&self) -> Set<T, H> {
        let storage = self.guard.read(Storage::compacted);
        Set::from_storage(self.element_type, storage)
    }

    /// Independent guarded copy.
    #[must_use]
    pub fn to_guarded(&self) -> GuardedSet<T> {
        self.clone_as()
    }

    /// Independent unguarded copy.
    #[must_use]
    pub fn to_unguarded(&self) -> UnguardedSet<T> {
        self.clone_as()
    }

    #[cfg(test)]
    fn footprint(&self) -> (usize, usize) {
        self.guard
            .read(|storage| (storage.slot_count(), storage.tombstones()))
    }
}

impl<T: Element, G: Guard<T>> Clone for Set<T, G> {
    fn clone(&self) -> Self {
        self.clone_as()
    }
}

impl<T: Element, G: Guard<T>> Extend<T> for Set<T, G> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl<T: Element, G: Guard<T>, H: Guard<T>> PartialEq<Set<T, H>> for Set<T, G> {
    fn eq(&self, other: &Set<T, H>) -> bool {
        self.element_type == other.element_type
            && self.guard.read(|mine| {
                other
                    .guard
                    .read(|theirs| mine.len() == theirs.len() && mine.is_subset(theirs))
            })
    }
}

impl<T: Element, G: Guard<T>> Eq for Set<T, G> {}

impl<T: Element + fmt::Debug, G: Guard<T>> fmt::Debug for Set<T, G> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.guard
            .read(|storage| formatter.debug_set().entries(storage.iter()).finish())
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T, G> serde::Serialize for Set<T, G>
where
    T: Element + serde::Serialize,
    G: Guard<T>,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        self.guard.read(|storage| {
            let mut seq = serializer.serialize_seq(Some(storage.len()))?;
            for element in storage.iter() {
                seq.serialize_element(element)?;
            }
            seq.end()
        })
    }
}

#[cfg(feature = "serde")]
struct SetVisitor<T, G> {
    marker: PhantomData<fn() -> (T, G)>,
}

#[cfg(feature = "serde")]
impl<'de, T, G> serde::de::Visitor<'de> for SetVisitor<T, G>
where
    T: Element + serde::Deserialize<'de>,
    G: Guard<T>,
{
    type Value = Set<T, G>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a non-empty sequence of values of one element type")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        use serde::de::Error;

        let mut values: Vec<T> = Vec::new();
        while let Some(element) = seq.next_element()? {
            values.push(element);
        }
        let sample = values
            .iter()
            .find(|value| !value.is_absent())
            .ok_or_else(|| A::Error::invalid_length(0, &self))?;
        let set: Set<T, G> = Set::new(sample).map_err(A::Error::custom)?;
        if let Some(stray) = values
            .iter()
            .find(|value| !value.is_absent() && !set.accepts(value))
        {
            return Err(A::Error::custom(format_args!(
                "mixed element types: expected {}, found {}",
                set.element_type,
                stray.element_type()
            )));
        }
        set.add_all(values);
        Ok(set)
    }
}

#[cfg(feature = "serde")]
impl<'de, T, G> serde::Deserialize<'de> for Set<T, G>
where
    T: Element + serde::Deserialize<'de>,
    G: Guard<T>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(SetVisitor {
            marker: PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
