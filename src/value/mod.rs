//! Dynamically typed values for sets whose element kind is chosen at runtime.
//!
//! [`Value`] is an opaque scalar, string, sequence or shared handle. Its
//! [`Element`] implementation reports the *kind* of each value as its element
//! type, so a `Set<Value>` built from an `Int64` sample accepts only `Int64`
//! values and ignores everything else.
//!
//! | Kind       | Element type name | Equality   | Notes                       |
//! |------------|-------------------|------------|-----------------------------|
//! | `Nil`      | `nil`             | partial    | absent, skipped on mutation |
//! | `Bool`     | `bool`            | total      |                             |
//! | `Byte`     | `u8`              | total      |                             |
//! | `Int32`    | `i32`             | total      |                             |
//! | `Int64`    | `i64`             | total      |                             |
//! | `Float32`  | `f32`             | partial    | compared by bit pattern     |
//! | `Float64`  | `f64`             | partial    | compared by bit pattern     |
//! | `Str`      | `string`          | total      |                             |
//! | `Bytes`    | `bytes`           | total      |                             |
//! | `Chars`    | `chars`           | total      |                             |
//! | `List`     | `list`            | partial    | a batch of values           |
//! | `Shared`   | `shared`          | identity   | compared by address         |
//!
//! The scalar coercions ([`Value::as_string`], [`Value::as_int`],
//! [`Value::as_int64`]) and their batch forms on [`ValueList`] extract typed
//! data from values read back out of a set.
//!
//! # Examples
//!
//! ```rust
//! use homoset::prelude::*;
//!
//! let ports = GuardedSet::new(&Value::from("")).unwrap();
//! ports.add_all(["80".into(), "443".into(), "80".into()]);
//!
//! let ports = ValueList::from(ports.to_vec());
//! assert_eq!(ports.as_ints(), vec![80, 443]);
//! ```

mod conv;
mod list;

pub use conv::{as_int, as_int64, as_string};
pub use list::ValueList;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::element::{Element, ElementType, Equality};

/// An opaque, dynamically typed value.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// The absent value.
    #[default]
    Nil,
    /// A boolean.
    Bool(bool),
    /// A single byte.
    Byte(u8),
    /// A 32-bit signed integer.
    Int32(i32),
    /// A 64-bit signed integer.
    Int64(i64),
    /// A 32-bit float.
    Float32(f32),
    /// A 64-bit float.
    Float64(f64),
    /// A UTF-8 string.
    Str(String),
    /// A byte string.
    Bytes(Vec<u8>),
    /// A sequence of characters.
    Chars(Vec<char>),
    /// An ordered sequence of values.
    List(Vec<Value>),
    /// A shared handle; two handles are equal only if they point to the same
    /// allocation.
    Shared(Arc<Value>),
}

/// The kind of a [`Value`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// [`Value::Nil`]
    Nil,
    /// [`Value::Bool`]
    Bool,
    /// [`Value::Byte`]
    Byte,
    /// [`Value::Int32`]
    Int32,
    /// [`Value::Int64`]
    Int64,
    /// [`Value::Float32`]
    Float32,
    /// [`Value::Float64`]
    Float64,
    /// [`Value::Str`]
    Str,
    /// [`Value::Bytes`]
    Bytes,
    /// [`Value::Chars`]
    Chars,
    /// [`Value::List`]
    List,
    /// [`Value::Shared`]
    Shared,
}

impl ValueKind {
    /// Element type name of this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Bool => "bool",
            Self::Byte => "u8",
            Self::Int32 => "i32",
            Self::Int64 => "i64",
            Self::Float32 => "f32",
            Self::Float64 => "f64",
            Self::Str => "string",
            Self::Bytes => "bytes",
            Self::Chars => "chars",
            Self::List => "list",
            Self::Shared => "shared",
        }
    }

    /// Equality classification of this kind.
    #[must_use]
    pub const fn equality(self) -> Equality {
        match self {
            Self::Nil | Self::Float32 | Self::Float64 | Self::List => Equality::Partial,
            Self::Shared => Equality::Identity,
            Self::Bool
            | Self::Byte
            | Self::Int32
            | Self::Int64
            | Self::Str
            | Self::Bytes
            | Self::Chars => Equality::Total,
        }
    }
}

impl Value {
    /// Wraps `value` in a new shared handle.
    #[must_use]
    pub fn shared(value: impl Into<Self>) -> Self {
        Self::Shared(Arc::new(value.into()))
    }

    /// Kind of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Nil => ValueKind::Nil,
            Self::Bool(_) => ValueKind::Bool,
            Self::Byte(_) => ValueKind::Byte,
            Self::Int32(_) => ValueKind::Int32,
            Self::Int64(_) => ValueKind::Int64,
            Self::Float32(_) => ValueKind::Float32,
            Self::Float64(_) => ValueKind::Float64,
            Self::Str(_) => ValueKind::Str,
            Self::Bytes(_) => ValueKind::Bytes,
            Self::Chars(_) => ValueKind::Chars,
            Self::List(_) => ValueKind::List,
            Self::Shared(_) => ValueKind::Shared,
        }
    }

    /// Returns `true` for [`Value::Nil`].
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }
}

impl Element for Value {
    fn element_type(&self) -> ElementType {
        let kind = self.kind();
        ElementType::kind_of::<Self>(kind.name(), kind.equality())
    }

    fn is_absent(&self) -> bool {
        self.is_nil()
    }

    fn batch(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Bool(left), Self::Bool(right)) => left == right,
            (Self::Byte(left), Self::Byte(right)) => left == right,
            (Self::Int32(left), Self::Int32(right)) => left == right,
            (Self::Int64(left), Self::Int64(right)) => left == right,
            (Self::Float32(left), Self::Float32(right)) => left.to_bits() == right.to_bits(),
            (Self::Float64(left), Self::Float64(right)) => left.to_bits() == right.to_bits(),
            (Self::Str(left), Self::Str(right)) => left == right,
            (Self::Bytes(left), Self::Bytes(right)) => left == right,
            (Self::Chars(left), Self::Chars(right)) => left == right,
            (Self::List(left), Self::List(right)) => left == right,
            (Self::Shared(left), Self::Shared(right)) => Arc::ptr_eq(left, right),
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Nil => {}
            Self::Bool(value) => value.hash(state),
            Self::Byte(value) => value.hash(state),
            Self::Int32(value) => value.hash(state),
            Self::Int64(value) => value.hash(state),
            Self::Float32(value) => value.to_bits().hash(state),
            Self::Float64(value) => value.to_bits().hash(state),
            Self::Str(value) => value.hash(state),
            Self::Bytes(value) => value.hash(state),
            Self::Chars(value) => value.hash(state),
            Self::List(values) => values.hash(state),
            Self::Shared(value) => std::ptr::hash(Arc::as_ptr(value), state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => formatter.write_str("nil"),
            Self::Bool(value) => write!(formatter, "{value}"),
            Self::Byte(value) => write!(formatter, "{value}"),
            Self::Int32(value) => write!(formatter, "{value}"),
            Self::Int64(value) => write!(formatter, "{value}"),
            Self::Float32(value) => write!(formatter, "{value}"),
            Self::Float64(value) => write!(formatter, "{value}"),
            Self::Str(value) => formatter.write_str(value),
            Self::Bytes(bytes) => write!(formatter, "{bytes:?}"),
            Self::Chars(chars) => {
                for character in chars {
                    write!(formatter, "{character}")?;
                }
                Ok(())
            }
            Self::List(values) => {
                formatter.write_str("[")?;
                for (position, value) in values.iter().enumerate() {
                    if position > 0 {
                        formatter.write_str(", ")?;
                    }
                    write!(formatter, "{value}")?;
                }
                formatter.write_str("]")
            }
            Self::Shared(value) => write!(formatter, "&{value}"),
        }
    }
}

macro_rules! impl_from_for_value {
    ($($source:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$source> for Value {
                fn from(value: $source) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_for_value!(
    bool => Bool,
    u8 => Byte,
    i32 => Int32,
    i64 => Int64,
    f32 => Float32,
    f64 => Float64,
    String => Str,
    Vec<u8> => Bytes,
    Vec<char> => Chars,
    Vec<Value> => List,
    Arc<Value> => Shared,
);

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Nil, Into::into)
    }
}
