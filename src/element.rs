//! Runtime element typing for sets.
//!
//! A [`Set`](crate::set::Set) is generic over its element type, but the
//! element type of a particular *value* is also available at runtime through
//! [`Element::element_type`]. For ordinary Rust types this is the static type
//! itself. For dynamic types such as [`Value`](crate::value::Value) it is the
//! kind of the value, which lets a set of `Value` stay homogeneous per kind.
//!
//! # Examples
//!
//! ```rust
//! use homoset::element::{Element, ElementType, Equality};
//!
//! let tag = 42_i32.element_type();
//! assert_eq!(tag, ElementType::of::<i32>());
//! assert_eq!(tag.equality(), Equality::Total);
//! assert_ne!(tag, ElementType::of::<i64>());
//! ```

use std::any::TypeId;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::ConstructionError;

/// How values of an element type compare for equality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Equality {
    /// Equality is reflexive and total, so deduplication by value is sound.
    Total,
    /// Equality is partial or not defined (floats, sequences, absent values).
    Partial,
    /// Distinct instances compare by address rather than by content.
    Identity,
}

/// Runtime tag identifying the element type of a value.
///
/// Two tags are equal when they refer to the same Rust type, carry the
/// same name and have equal component tags. Dynamic types use the name to
/// distinguish their kinds; compound types (tuples, `Option`) derive their
/// tag from the tags of their components.
#[derive(Clone, Copy)]
pub struct ElementType {
    id: TypeId,
    name: &'static str,
    equality: Equality,
    // Fingerprint of component tags, 0 for leaf types
    components: u64,
}

impl ElementType {
    /// Tag for the static type `T` with total equality.
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            equality: Equality::Total,
            components: 0,
        }
    }

    /// Tag for one kind of the dynamic type `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use homoset::element::{ElementType, Equality};
    ///
    /// struct Dynamic;
    ///
    /// let text = ElementType::kind_of::<Dynamic>("text", Equality::Total);
    /// let number = ElementType::kind_of::<Dynamic>("number", Equality::Total);
    /// assert_ne!(text, number);
    /// assert_eq!(text.name(), "text");
    /// ```
    #[must_use]
    pub fn kind_of<T: ?Sized + 'static>(name: &'static str, equality: Equality) -> Self {
        Self {
            id: TypeId::of::<T>(),
            name,
            equality,
            components: 0,
        }
    }

    /// Tag for a type `T` that wraps exactly one value, such as `Option`.
    ///
    /// The result keeps the name, equality and components of `inner`, so a
    /// wrapper is homogeneous exactly when its contents are.
    #[must_use]
    pub fn wrapping<T: ?Sized + 'static>(inner: Self) -> Self {
        Self {
            id: TypeId::of::<T>(),
            ..inner
        }
    }

    /// Tag for a product type `T` (a tuple) built from its component tags.
    ///
    /// The first component without total equality decides the equality of
    /// the whole product, so a single float or shared handle makes the
    /// product unusable as a set element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use homoset::element::{ElementType, Equality};
    ///
    /// let pair = ElementType::product::<(u8, f32)>(&[
    ///     ElementType::of::<u8>(),
    ///     ElementType::of::<f32>().with_equality(Equality::Partial),
    /// ]);
    /// assert_eq!(pair.equality(), Equality::Partial);
    /// ```
    #[must_use]
    pub fn product<T: ?Sized + 'static>(parts: &[Self]) -> Self {
        let equality = parts
            .iter()
            .map(Self::equality)
            .find(|equality| *equality != Equality::Total)
            .unwrap_or(Equality::Total);
        let mut hasher = DefaultHasher::new();
        parts.hash(&mut hasher);
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            equality,
            components: hasher.finish(),
        }
    }

    /// Returns the same tag with a different equality classification.
    #[must_use]
    pub const fn with_equality(self, equality: Equality) -> Self {
        Self { equality, ..self }
    }

    /// Human readable name of the type or kind.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Equality classification of the type.
    #[must_use]
    pub const fn equality(&self) -> Equality {
        self.equality
    }

    /// Checks that values of this type can be deduplicated by value.
    ///
    /// # Errors
    ///
    /// - [`ConstructionError::NotEquatable`] for [`Equality::Partial`]
    /// - [`ConstructionError::IdentityTypeNotAllowed`] for [`Equality::Identity`]
    pub fn validate(&self) -> Result<(), ConstructionError> {
        match self.equality {
            Equality::Total => Ok(()),
            Equality::Partial => Err(ConstructionError::NotEquatable {
                type_name: self.name,
            }),
            Equality::Identity => Err(ConstructionError::IdentityTypeNotAllowed {
                type_name: self.name,
            }),
        }
    }
}

impl PartialEq for ElementType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.name == other.name && self.components == other.components
    }
}

impl Eq for ElementType {}

impl Hash for ElementType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.name.hash(state);
        self.components.hash(state);
    }
}

impl fmt::Debug for ElementType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ElementType")
            .field("name", &self.name)
            .field("equality", &self.equality)
            .finish()
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name)
    }
}

/// A type whose values can be stored in a [`Set`](crate::set::Set).
///
/// The defaults describe a plain value type: its element type is the static
/// type, no value is absent, and no value is a batch. Implement the trait
/// with an empty body for your own value types:
///
/// ```rust
/// use homoset::prelude::*;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// struct UserId(u64);
///
/// impl Element for UserId {}
///
/// let users = GuardedSet::new(&UserId(0)).unwrap();
/// users.add(UserId(7)).add(UserId(7));
/// assert_eq!(users.len(), 1);
/// ```
pub trait Element: Clone + Eq + Hash + 'static {
    /// Runtime element type of this value.
    fn element_type(&self) -> ElementType {
        ElementType::of::<Self>()
    }

    /// Returns `true` for an absent value, which insertion and removal skip.
    fn is_absent(&self) -> bool {
        false
    }

    /// Returns the items when this value is a batch of elements.
    ///
    /// Insertion and removal apply to each item of a batch instead of the
    /// batch itself.
    fn batch(&self) -> Option<&[Self]> {
        None
    }
}

macro_rules! impl_value_element {
    ($($element:ty),* $(,)?) => {
        $(impl Element for $element {})*
    };
}

impl_value_element!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, String,
    &'static str, (),
);

impl<A: Element, B: Element> Element for (A, B) {
    fn element_type(&self) -> ElementType {
        ElementType::product::<Self>(&[self.0.element_type(), self.1.element_type()])
    }
}

impl<A: Element, B: Element, C: Element> Element for (A, B, C) {
    fn element_type(&self) -> ElementType {
        ElementType::product::<Self>(&[
            self.0.element_type(),
            self.1.element_type(),
            self.2.element_type(),
        ])
    }
}

/// `None` is absent and has no comparable type; `Some(value)` has the
/// element type of `value`.
impl<T: Element> Element for Option<T> {
    fn element_type(&self) -> ElementType {
        match self {
            Some(inner) => ElementType::wrapping::<Self>(inner.element_type()),
            None => ElementType::of::<Self>().with_equality(Equality::Partial),
        }
    }

    fn is_absent(&self) -> bool {
        self.as_ref().is_none_or(Element::is_absent)
    }
}
