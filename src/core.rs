//! Core traits and key extractors.
//!
//! This module defines:
//! - [`KeyExtractor`]: maps one element to the raw key it is sorted by.
//! - [`FieldAccess`]: structural field lookup by name, the facility behind [`ByField`].
//! - The built-in extractors [`ByValue`], [`ByField`], [`ByMapKey`], [`ByIndex`] and
//!   [`TryKey`]. Any `Fn(&E) -> K` closure is an extractor as well.

use crate::error::{Error, Result};
use crate::value::Value;
use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;
use std::sync::Arc;

/// Produces the raw sort key for one element.
///
/// The sorter calls [`extract`](KeyExtractor::extract) exactly once per element, in input
/// order, before any comparison happens.
///
/// # Examples
///
/// A closure is the quickest custom extractor:
///
/// ```
/// use keysort::Sorter;
///
/// let mut words = vec!["ccc", "a", "bb"];
/// Sorter::new().by(|w: &&str| w.len()).ordered().sort(&mut words)?;
/// assert_eq!(words, vec!["a", "bb", "ccc"]);
/// # Ok::<(), keysort::Error>(())
/// ```
pub trait KeyExtractor<E: ?Sized> {
    /// The raw key handed to the ordering policy.
    type Key;

    fn extract(&self, element: &E) -> Result<Self::Key>;
}

impl<E: ?Sized, K, F> KeyExtractor<E> for F
where
    F: Fn(&E) -> K,
{
    type Key = K;

    fn extract(&self, element: &E) -> Result<K> {
        Ok(self(element))
    }
}

/// Named-field lookup for record-like types.
///
/// Implement this on your own types to make them sortable with [`ByField`]. Fields are
/// returned as dynamic [`Value`]s so records with mixed field types share one key type.
///
/// ```
/// use keysort::{FieldAccess, Value};
///
/// struct Person {
///     name: String,
///     height: u32,
/// }
///
/// impl FieldAccess for Person {
///     fn field(&self, name: &str) -> Option<Value> {
///         match name {
///             "Name" => Some(self.name.as_str().into()),
///             "Height" => Some(self.height.into()),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait FieldAccess {
    fn field(&self, name: &str) -> Option<Value>;
}

impl FieldAccess for Value {
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

// One level of indirection is looked through, so slices of references or boxes sort
// the same as slices of the records themselves.
impl<T: FieldAccess + ?Sized> FieldAccess for &T {
    fn field(&self, name: &str) -> Option<Value> {
        (**self).field(name)
    }
}

impl<T: FieldAccess + ?Sized> FieldAccess for Box<T> {
    fn field(&self, name: &str) -> Option<Value> {
        (**self).field(name)
    }
}

impl<T: FieldAccess + ?Sized> FieldAccess for Rc<T> {
    fn field(&self, name: &str) -> Option<Value> {
        (**self).field(name)
    }
}

impl<T: FieldAccess + ?Sized> FieldAccess for Arc<T> {
    fn field(&self, name: &str) -> Option<Value> {
        (**self).field(name)
    }
}

/// The element itself is the key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ByValue;

impl<E: Clone> KeyExtractor<E> for ByValue {
    type Key = E;

    fn extract(&self, element: &E) -> Result<E> {
        Ok(element.clone())
    }
}

/// The value of a named field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ByField(pub String);

impl<E: FieldAccess> KeyExtractor<E> for ByField {
    type Key = Value;

    fn extract(&self, element: &E) -> Result<Value> {
        element.field(&self.0).ok_or_else(|| Error::FieldNotFound {
            field: self.0.clone(),
            type_name: std::any::type_name::<E>(),
        })
    }
}

/// The value stored under a key, for elements that are themselves mappings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ByMapKey<Q>(pub Q);

fn key_not_found<Q: Debug + ?Sized>(key: &Q) -> Error {
    Error::KeyNotFound {
        key: format!("{key:?}"),
    }
}

impl<K, V, Q, S> KeyExtractor<HashMap<K, V, S>> for ByMapKey<Q>
where
    K: Borrow<Q> + Hash + Eq,
    Q: Hash + Eq + Debug,
    V: Clone,
    S: std::hash::BuildHasher,
{
    type Key = V;

    fn extract(&self, element: &HashMap<K, V, S>) -> Result<V> {
        element.get(&self.0).cloned().ok_or_else(|| key_not_found(&self.0))
    }
}

impl<K, V, Q> KeyExtractor<BTreeMap<K, V>> for ByMapKey<Q>
where
    K: Borrow<Q> + Ord,
    Q: Ord + Debug,
    V: Clone,
{
    type Key = V;

    fn extract(&self, element: &BTreeMap<K, V>) -> Result<V> {
        element.get(&self.0).cloned().ok_or_else(|| key_not_found(&self.0))
    }
}

impl<Q: AsRef<str> + Debug> KeyExtractor<Value> for ByMapKey<Q> {
    type Key = Value;

    fn extract(&self, element: &Value) -> Result<Value> {
        match element {
            Value::Map(map) => map
                .get(self.0.as_ref())
                .cloned()
                .ok_or_else(|| key_not_found(&self.0)),
            other => Err(Error::UnsupportedKind {
                expected: "map",
                found: other.kind_name(),
            }),
        }
    }
}

/// The item at a fixed position, for elements that are themselves sequences.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ByIndex(pub usize);

impl ByIndex {
    fn pick<T: Clone>(&self, items: &[T]) -> Result<T> {
        items.get(self.0).cloned().ok_or(Error::IndexOutOfRange {
            index: self.0,
            len: items.len(),
        })
    }
}

impl<T: Clone> KeyExtractor<Vec<T>> for ByIndex {
    type Key = T;

    fn extract(&self, element: &Vec<T>) -> Result<T> {
        self.pick(element)
    }
}

impl<T: Clone, const N: usize> KeyExtractor<[T; N]> for ByIndex {
    type Key = T;

    fn extract(&self, element: &[T; N]) -> Result<T> {
        self.pick(element)
    }
}

impl<T: Clone> KeyExtractor<Box<[T]>> for ByIndex {
    type Key = T;

    fn extract(&self, element: &Box<[T]>) -> Result<T> {
        self.pick(element)
    }
}

impl<'s, T: Clone> KeyExtractor<&'s [T]> for ByIndex {
    type Key = T;

    fn extract(&self, element: &&'s [T]) -> Result<T> {
        self.pick(element)
    }
}

// VecDeque is not contiguous, so it is indexed directly rather than through `pick`.
impl<T: Clone> KeyExtractor<VecDeque<T>> for ByIndex {
    type Key = T;

    fn extract(&self, element: &VecDeque<T>) -> Result<T> {
        element.get(self.0).cloned().ok_or(Error::IndexOutOfRange {
            index: self.0,
            len: element.len(),
        })
    }
}

impl KeyExtractor<Value> for ByIndex {
    type Key = Value;

    fn extract(&self, element: &Value) -> Result<Value> {
        match element {
            Value::List(items) => self.pick(items),
            other => Err(Error::UnsupportedKind {
                expected: "list",
                found: other.kind_name(),
            }),
        }
    }
}

/// Wraps a fallible closure as an extractor.
///
/// ```
/// use keysort::{Error, Sorter, TryKey};
///
/// let mut lines = vec!["b=2", "a=1", "c"];
/// let err = Sorter::new()
///     .by(TryKey(|line: &&str| {
///         line.split_once('=')
///             .map(|(_, v)| v.to_string())
///             .ok_or(Error::KeyNotFound { key: format!("{line:?}") })
///     }))
///     .sort(&mut lines)
///     .unwrap_err();
/// assert!(matches!(err, Error::KeyNotFound { .. }));
/// assert_eq!(lines, vec!["b=2", "a=1", "c"]);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct TryKey<F>(pub F);

impl<E: ?Sized, K, F> KeyExtractor<E> for TryKey<F>
where
    F: Fn(&E) -> Result<K>,
{
    type Key = K;

    fn extract(&self, element: &E) -> Result<K> {
        (self.0)(element)
    }
}
