//! Concurrency guards selecting how a set synchronizes access.
//!
//! - [`Locked`]: a `parking_lot::RwLock`. Reads share the lock, mutations
//!   take it exclusively, one operation per acquisition. The set is `Sync`.
//! - [`Unlocked`]: a `RefCell`. No synchronization cost, and the set is
//!   `!Sync`, so the compiler keeps it on one thread.
//!
//! Reads use `read_recursive` so that an operation holding a read lock on
//! two sets (or twice on the same set) never waits behind a queued writer.

use std::cell::RefCell;

use parking_lot::RwLock;

use super::storage::Storage;

/// Concurrency mode of a set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Every operation acquires a reader/writer lock.
    Guarded,
    /// No locking; the set cannot be shared between threads.
    Unguarded,
}

pub(crate) mod sealed {
    use super::Storage;

    pub trait Sealed<T> {
        fn wrap(storage: Storage<T>) -> Self;

        fn read<R>(&self, operation: impl FnOnce(&Storage<T>) -> R) -> R;

        fn write<R>(&self, operation: impl FnOnce(&mut Storage<T>) -> R) -> R;

        fn into_storage(self) -> Storage<T>;
    }
}

/// Storage wrapper deciding the concurrency mode of a [`Set`](super::Set).
///
/// This trait is sealed; [`Locked`] and [`Unlocked`] are its only
/// implementations.
pub trait Guard<T>: sealed::Sealed<T> {
    /// Mode provided by this guard.
    const MODE: Mode;
}

/// Reader/writer locked storage.
#[derive(Debug)]
pub struct Locked<T>(RwLock<Storage<T>>);

impl<T> sealed::Sealed<T> for Locked<T> {
    fn wrap(storage: Storage<T>) -> Self {
        Self(RwLock::new(storage))
    }

    #[inline]
    fn read<R>(&self, operation: impl FnOnce(&Storage<T>) -> R) -> R {
        operation(&self.0.read_recursive())
    }

    #[inline]
    fn write<R>(&self, operation: impl FnOnce(&mut Storage<T>) -> R) -> R {
        operation(&mut self.0.write())
    }

    fn into_storage(self) -> Storage<T> {
        self.0.into_inner()
    }
}

impl<T> Guard<T> for Locked<T> {
    const MODE: Mode = Mode::Guarded;
}

/// Unsynchronized storage for single-threaded use.
#[derive(Debug)]
pub struct Unlocked<T>(RefCell<Storage<T>>);

impl<T> sealed::Sealed<T> for Unlocked<T> {
    fn wrap(storage: Storage<T>) -> Self {
        Self(RefCell::new(storage))
    }

    #[inline]
    fn read<R>(&self, operation: impl FnOnce(&Storage<T>) -> R) -> R {
        operation(&self.0.borrow())
    }

    #[inline]
    fn write<R>(&self, operation: impl FnOnce(&mut Storage<T>) -> R) -> R {
        operation(&mut self.0.borrow_mut())
    }

    fn into_storage(self) -> Storage<T> {
        self.0.into_inner()
    }
}

impl<T> Guard<T> for Unlocked<T> {
    const MODE: Mode = Mode::Unguarded;
}
