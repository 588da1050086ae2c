//! An ordered list of values with batch coercions.

use std::ops::Deref;

use super::Value;
use crate::set::{Guard, Set};

/// An ordered sequence of [`Value`]s.
///
/// Usually obtained from a set snapshot, then coerced in one pass.
///
/// # Examples
///
/// ```rust
/// use homoset::value::{Value, ValueList};
///
/// let list: ValueList = [Value::from("7"), Value::Int64(8), Value::Nil]
///     .into_iter()
///     .collect();
///
/// assert_eq!(list.as_ints(), vec![7, 8, 0]);
/// assert_eq!(list.as_strings(), vec!["7", "8", ""]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ValueList(Vec<Value>);

impl ValueList {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Each value converted with [`Value::as_int`].
    #[must_use]
    pub fn as_ints(&self) -> Vec<i32> {
        self.0.iter().map(Value::as_int).collect()
    }

    /// Each value converted with [`Value::as_int64`].
    #[must_use]
    pub fn as_int64s(&self) -> Vec<i64> {
        self.0.iter().map(Value::as_int64).collect()
    }

    /// Each value converted with [`Value::as_string`].
    #[must_use]
    pub fn as_strings(&self) -> Vec<String> {
        self.0.iter().map(Value::as_string).collect()
    }

    /// Returns the underlying vector.
    #[must_use]
    pub fn into_inner(self) -> Vec<Value> {
        self.0
    }
}

impl<G: Guard<Value>> Set<Value, G> {
    /// Live members in insertion order, as a [`ValueList`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use homoset::prelude::*;
    ///
    /// let ids = GuardedSet::from_values(&Value::Int64(0), [Value::Int64(5), Value::Int64(9)])
    ///     .unwrap();
    /// assert_eq!(ids.to_value_list().as_int64s(), vec![5, 9]);
    /// ```
    #[must_use]
    pub fn to_value_list(&self) -> ValueList {
        ValueList(self.to_vec())
    }
}

impl Deref for ValueList {
    type Target = [Value];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Value>> for ValueList {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

impl From<ValueList> for Value {
    fn from(list: ValueList) -> Self {
        Self::List(list.0)
    }
}

impl FromIterator<Value> for ValueList {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ValueList {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValueList {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
