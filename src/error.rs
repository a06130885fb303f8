//! Error type shared by the copier, the key extractors and the ordering policies.
//!
//! Every failure aborts the whole operation: a sort that fails leaves its input in the
//! original order, and a copy that fails leaves its destination untouched.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors produced by `keysort` operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A container was required but a scalar (or the wrong container) was given.
    #[error("unsupported kind: expected {expected}, got {found}")]
    UnsupportedKind {
        /// What the operation needed, e.g. "list or map".
        expected: &'static str,
        /// The kind that was actually supplied.
        found: &'static str,
    },

    /// The copy destination cannot hold a sequence or mapping.
    #[error("invalid destination: expected a list or map kind, got {found}")]
    InvalidDestination {
        /// The destination kind that was rejected.
        found: String,
    },

    /// An element, key or value could not be converted to the destination type.
    #[error("type mismatch at {position}: cannot convert {from} to {to}")]
    TypeMismatch {
        /// Where the offending element sits, e.g. `index 2` or `key "one"`.
        position: String,
        /// Source type name.
        from: String,
        /// Destination type name.
        to: String,
    },

    /// `ByField` could not find the named field on an element.
    #[error("field `{field}` not found on {type_name}")]
    FieldNotFound {
        /// The field that was requested.
        field: String,
        /// The element type that was searched.
        type_name: &'static str,
    },

    /// `ByMapKey` could not find the key in a mapping element.
    #[error("key {key} not found")]
    KeyNotFound {
        /// `Debug` rendering of the missing key.
        key: String,
    },

    /// `ByIndex` asked for a position past the end of a sequence element.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The requested position.
        index: usize,
        /// Length of the element that was indexed.
        len: usize,
    },

    /// The ordering policy has no order between two normalized keys.
    #[error("cannot compare {left} with {right}")]
    IncomparableKeys {
        /// Kind of the left-hand key.
        left: &'static str,
        /// Kind of the right-hand key.
        right: &'static str,
    },
}

impl Error {
    pub(crate) fn type_mismatch(position: impl Into<String>, from: &str, to: &str) -> Self {
        Self::TypeMismatch {
            position: position.into(),
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let err = Error::type_mismatch("index 2", "i64", "f32");
        assert_eq!(
            err.to_string(),
            "type mismatch at index 2: cannot convert i64 to f32"
        );

        let err = Error::IndexOutOfRange { index: 4, len: 2 };
        assert_eq!(err.to_string(), "index 4 out of range for length 2");
    }
}
