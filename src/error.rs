//! Errors raised when a [`Set`](crate::set::Set) is constructed.
//!
//! Construction is the only fallible step. Every operation on an existing
//! set is total: a mismatched argument degrades to a no-op or a vacuous
//! result instead of an error.

use thiserror::Error;

/// Reasons a sample value cannot fix the element type of a new set.
///
/// # Examples
///
/// ```rust
/// use homoset::prelude::*;
///
/// let result = GuardedSet::new(&Value::Float64(1.5));
/// assert_eq!(
///     result.unwrap_err(),
///     ConstructionError::NotEquatable { type_name: "f64" }
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConstructionError {
    /// The element type has no reflexive, total equality.
    #[error("type {type_name} cannot be compared for equality")]
    NotEquatable {
        /// Name of the rejected element type.
        type_name: &'static str,
    },
    /// The element type compares by identity (address), not by value.
    #[error("type {type_name} is an identity type and cannot be a set element")]
    IdentityTypeNotAllowed {
        /// Name of the rejected element type.
        type_name: &'static str,
    },
}

impl ConstructionError {
    /// Name of the element type that was rejected.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::NotEquatable { type_name } | Self::IdentityTypeNotAllowed { type_name } => {
                type_name
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::not_equatable(
        ConstructionError::NotEquatable { type_name: "f64" },
        "type f64 cannot be compared for equality"
    )]
    #[case::identity(
        ConstructionError::IdentityTypeNotAllowed { type_name: "shared" },
        "type shared is an identity type and cannot be a set element"
    )]
    fn test_display(#[case] error: ConstructionError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    fn test_type_name_accessor() {
        let error = ConstructionError::IdentityTypeNotAllowed { type_name: "shared" };
        assert_eq!(error.type_name(), "shared");
    }

    #[rstest]
    fn test_error_trait() {
        let error = ConstructionError::NotEquatable { type_name: "list" };
        let _: &dyn std::error::Error = &error;
    }
}
