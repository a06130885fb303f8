//! Ordering policies.
//!
//! A policy turns raw keys into a comparable form once per sort
//! ([`normalize`](OrderingPolicy::normalize)) and then compares the normalized keys
//! pairwise ([`compare`](OrderingPolicy::compare)).
//!
//! | Policy            | Raw key      | Order                                             |
//! |-------------------|--------------|---------------------------------------------------|
//! | [`StringPolicy`]  | `Display`    | bytewise on the rendered string                   |
//! | [`NaturalPolicy`] | `Display`    | tokens, `2.10 < 2.3 < 10.1`                       |
//! | [`VersionPolicy`] | `Display`    | integer tokens, `2.3 < 2.10 < 10.1`               |
//! | [`OrdPolicy`]     | `Ord`        | the key's own `Ord`                               |
//! | [`ValuePolicy`]   | [`Value`]    | numbers, strings, bools, lists; else an error     |

use crate::error::{Error, Result};
use crate::token::{Mode, TokenizedKey, cmp_floats, cmp_int_float};
use crate::value::Value;
use std::cmp::Ordering;
use std::fmt::Display;

/// Strategy for ordering raw keys.
///
/// `compare` must describe a strict weak ordering over the normalized keys: the induced
/// "less" relation is irreflexive and transitive, and "neither is less" is an
/// equivalence.
pub trait OrderingPolicy<K> {
    /// Policy-specific comparable form of a raw key.
    type Normalized;

    /// Converts all raw keys of one sort in a single pass, preserving order.
    fn normalize(&self, keys: Vec<K>) -> Result<Vec<Self::Normalized>>;

    fn compare(&self, a: &Self::Normalized, b: &Self::Normalized) -> Result<Ordering>;

    fn less(&self, a: &Self::Normalized, b: &Self::Normalized) -> Result<bool> {
        Ok(self.compare(a, b)? == Ordering::Less)
    }
}

/// Plain string ordering on each key's `Display` rendering.
///
/// With this policy `"item-10" < "item-100" < "item-2"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StringPolicy;

impl<K: Display> OrderingPolicy<K> for StringPolicy {
    type Normalized = String;

    fn normalize(&self, keys: Vec<K>) -> Result<Vec<String>> {
        Ok(keys.iter().map(ToString::to_string).collect())
    }

    fn compare(&self, a: &String, b: &String) -> Result<Ordering> {
        Ok(a.as_bytes().cmp(b.as_bytes()))
    }
}

/// Natural ("human") ordering: embedded numbers compare by value.
///
/// Digits with one decimal point form a float, so `2.10 < 2.3 < 10.1`, and
/// `"item-2" < "item-10" < "item-100"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NaturalPolicy;

impl<K: Display> OrderingPolicy<K> for NaturalPolicy {
    type Normalized = TokenizedKey;

    fn normalize(&self, keys: Vec<K>) -> Result<Vec<TokenizedKey>> {
        Ok(tokenize_all(keys, Mode::Natural))
    }

    fn compare(&self, a: &TokenizedKey, b: &TokenizedKey) -> Result<Ordering> {
        Ok(a.compare(b))
    }
}

/// Version ordering: like [`NaturalPolicy`], but a `.` always separates integers.
///
/// `"2.3" < "2.10" < "10.1"`, and `"1.2" < "1.2.1" < "1.10"` since a key that runs
/// out of tokens first sorts first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VersionPolicy;

impl<K: Display> OrderingPolicy<K> for VersionPolicy {
    type Normalized = TokenizedKey;

    fn normalize(&self, keys: Vec<K>) -> Result<Vec<TokenizedKey>> {
        Ok(tokenize_all(keys, Mode::Version))
    }

    fn compare(&self, a: &TokenizedKey, b: &TokenizedKey) -> Result<Ordering> {
        Ok(a.compare(b))
    }
}

fn tokenize_all<K: Display>(keys: Vec<K>, mode: Mode) -> Vec<TokenizedKey> {
    log::trace!("tokenizing {} keys ({mode:?})", keys.len());
    keys.into_iter()
        .map(|k| TokenizedKey::new(k.to_string(), mode))
        .collect()
}

/// Uses the raw key's own [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OrdPolicy;

impl<K: Ord> OrderingPolicy<K> for OrdPolicy {
    type Normalized = K;

    fn normalize(&self, keys: Vec<K>) -> Result<Vec<K>> {
        Ok(keys)
    }

    fn compare(&self, a: &K, b: &K) -> Result<Ordering> {
        Ok(a.cmp(b))
    }
}

/// Orders dynamic [`Value`] keys by their content.
///
/// Integers and floats compare numerically with each other, strings bytewise, booleans
/// `false < true`, lists lexicographically, and `null` only equals `null`. Any other
/// pairing (a string against a number, a map against anything) is an
/// [`Error::IncomparableKeys`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ValuePolicy;

impl OrderingPolicy<Value> for ValuePolicy {
    type Normalized = Value;

    fn normalize(&self, keys: Vec<Value>) -> Result<Vec<Value>> {
        Ok(keys)
    }

    fn compare(&self, a: &Value, b: &Value) -> Result<Ordering> {
        compare_values(a, b)
    }
}

fn compare_values(a: &Value, b: &Value) -> Result<Ordering> {
    let ordering = match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Int(x), Value::Int(y)) => x.cmp(y),
        (Value::Int(x), Value::Float(y)) => cmp_int_float(*x, *y),
        (Value::Float(x), Value::Int(y)) => cmp_int_float(*y, *x).reverse(),
        (Value::Float(x), Value::Float(y)) => cmp_floats(*x, *y),
        (Value::Str(x), Value::Str(y)) => x.as_bytes().cmp(y.as_bytes()),
        (Value::List(xs), Value::List(ys)) => {
            for (x, y) in xs.iter().zip(ys) {
                match compare_values(x, y)? {
                    Ordering::Equal => continue,
                    unequal => return Ok(unequal),
                }
            }
            xs.len().cmp(&ys.len())
        }
        _ => {
            return Err(Error::IncomparableKeys {
                left: a.kind_name(),
                right: b.kind_name(),
            });
        }
    };
    Ok(ordering)
}
