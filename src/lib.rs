//! # homoset
//!
//! Type-homogeneous, insertion-ordered sets that can be shared between
//! threads or kept lock-free on one thread.
//!
//! ## Overview
//!
//! - **Sets**: [`Set`](set::Set) fixes its element type from a sample value
//!   at construction and then silently ignores values of any other type
//! - **Concurrency**: [`GuardedSet`](set::GuardedSet) locks on every
//!   operation, [`UnguardedSet`](set::UnguardedSet) does not and is `!Sync`
//! - **Null sets**: [`OptionSetExt`](set::OptionSetExt) lets an absent
//!   `Option<&Set>` act as an empty, read-only set
//! - **Dynamic values**: [`Value`](value::Value) carries its kind at runtime,
//!   with best-effort coercions to strings and integers
//!
//! Removal leaves tombstones that are compacted away in bulk once
//! [`COMPACTION_THRESHOLD`](set::COMPACTION_THRESHOLD) of them pile up, so
//! iteration order stays the order of insertion.
//!
//! ## Feature Flags
//!
//! - `fxhash` (default): hash the member index with `rustc-hash`
//! - `serde`: `Serialize`/`Deserialize` for sets and values
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use homoset::prelude::*;
//!
//! let left = GuardedSet::from_values(&0, [1, 2, 3]).unwrap();
//! let right = UnguardedSet::from_values(&0, [2, 3, 4]).unwrap();
//!
//! assert!(left.overlaps(&right));
//! assert_eq!(left.intersection(&right).to_vec(), vec![2, 3]);
//!
//! let err = GuardedSet::new(&Value::shared(1_i64)).unwrap_err();
//! assert!(matches!(err, ConstructionError::IdentityTypeNotAllowed { .. }));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use homoset::prelude::*;
/// ```
pub mod prelude {
    pub use crate::element::{Element, ElementType, Equality};
    pub use crate::error::ConstructionError;
    pub use crate::set::{
        COMPACTION_THRESHOLD, Guard, GuardedSet, Locked, Mode, OptionSetExt, Set, UnguardedSet,
        Unlocked,
    };
    pub use crate::value::{Value, ValueKind, ValueList, as_int, as_int64, as_string};
}

pub mod element;
pub mod error;
pub mod set;
pub mod value;
