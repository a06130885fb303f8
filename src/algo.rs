//! The key-based sorter.
//!
//! Sorting runs in three phases:
//! 1. **Extract**: the [`KeyExtractor`] produces one raw key per element, in input order.
//! 2. **Normalize**: the [`OrderingPolicy`] converts all raw keys in one batch.
//! 3. **Order**: a stable merge sort reorders the *indices* `0..n` by comparing the
//!    normalized keys; the resulting permutation is then applied to the data in a
//!    single cycle-following pass.
//!
//! Keys never move during the sort, only indices do, so keys and elements cannot fall
//! out of step. Any error (a missing field, incomparable keys) surfaces before the
//! data is touched.

use crate::core::{ByField, ByIndex, ByMapKey, ByValue, KeyExtractor};
use crate::error::{Error, Result};
use crate::policy::{NaturalPolicy, OrdPolicy, OrderingPolicy, StringPolicy, ValuePolicy, VersionPolicy};
use crate::value::Value;
use std::cmp::Ordering;

/// Runs shorter than this are sorted by insertion before merging.
const INSERTION_RUN: usize = 16;

/// Sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    /// Applies the direction to an ascending comparison result.
    ///
    /// Descending reverses the ordering rather than negating "less", so keys that
    /// compare equal stay equal and keep their input order.
    #[inline]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    }
}

/// A sort configuration: direction, key extractor and ordering policy.
///
/// Built with consuming setters and then used any number of times through `&self`.
/// Defaults are ascending, [`ByValue`] and [`StringPolicy`].
///
/// # Examples
///
/// ```
/// use keysort::Sorter;
///
/// let mut files = vec!["img12.png", "img10.png", "IMG2.png", "img2.png", "img1.png"];
/// Sorter::new().natural().sort(&mut files)?;
/// assert_eq!(files, vec!["IMG2.png", "img1.png", "img2.png", "img10.png", "img12.png"]);
///
/// Sorter::new().natural().descending().sort(&mut files)?;
/// assert_eq!(files[0], "img12.png");
/// # Ok::<(), keysort::Error>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Sorter<X = ByValue, P = StringPolicy> {
    direction: Direction,
    extractor: X,
    policy: P,
}

impl Sorter {
    /// Ascending, by value, string ordering.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<X, P> Sorter<X, P> {
    /// Smallest key first (the default).
    pub fn ascending(self) -> Self {
        self.direction(Direction::Ascending)
    }

    /// Largest key first. Equal keys still keep their input order.
    pub fn descending(self) -> Self {
        self.direction(Direction::Descending)
    }

    /// Sets the direction explicitly.
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Replaces the key extractor; any closure `Fn(&E) -> K` works.
    pub fn by<Y>(self, extractor: Y) -> Sorter<Y, P> {
        Sorter {
            direction: self.direction,
            extractor,
            policy: self.policy,
        }
    }

    /// Sorts by the elements themselves.
    pub fn by_value(self) -> Sorter<ByValue, P> {
        self.by(ByValue)
    }

    /// Sorts records by a named field (see [`FieldAccess`](crate::core::FieldAccess)).
    pub fn by_field(self, name: impl Into<String>) -> Sorter<ByField, P> {
        self.by(ByField(name.into()))
    }

    /// Sorts mappings by the value stored under `key`.
    pub fn by_map_key<Q>(self, key: Q) -> Sorter<ByMapKey<Q>, P> {
        self.by(ByMapKey(key))
    }

    /// Sorts sequences by their element at `index`.
    pub fn by_index(self, index: usize) -> Sorter<ByIndex, P> {
        self.by(ByIndex(index))
    }

    /// Replaces the ordering policy.
    pub fn policy<Q>(self, policy: Q) -> Sorter<X, Q> {
        Sorter {
            direction: self.direction,
            extractor: self.extractor,
            policy,
        }
    }

    /// Compares the rendered keys bytewise.
    pub fn string(self) -> Sorter<X, StringPolicy> {
        self.policy(StringPolicy)
    }

    /// Compares digit runs by value, so `"item-2" < "item-10"`.
    pub fn natural(self) -> Sorter<X, NaturalPolicy> {
        self.policy(NaturalPolicy)
    }

    /// Like [`natural`](Self::natural), but a `.` always separates numbers.
    pub fn version(self) -> Sorter<X, VersionPolicy> {
        self.policy(VersionPolicy)
    }

    /// Uses the key's own `Ord`.
    pub fn ordered(self) -> Sorter<X, OrdPolicy> {
        self.policy(OrdPolicy)
    }

    /// Compares dynamic [`Value`] keys, numbers numerically.
    pub fn values(self) -> Sorter<X, ValuePolicy> {
        self.policy(ValuePolicy)
    }

    /// Computes the permutation that sorts `data`, without modifying it.
    ///
    /// Position `i` of the result holds the index of the element that belongs at `i`.
    /// The sort is stable: elements with equal keys keep their relative order.
    ///
    /// ```
    /// use keysort::Sorter;
    ///
    /// let data = ["banana", "apple", "cherry"];
    /// assert_eq!(Sorter::new().sorted_indices(&data)?, vec![1, 0, 2]);
    /// # Ok::<(), keysort::Error>(())
    /// ```
    pub fn sorted_indices<E>(&self, data: &[E]) -> Result<Vec<usize>>
    where
        X: KeyExtractor<E>,
        P: OrderingPolicy<X::Key>,
    {
        let raw = data
            .iter()
            .map(|element| self.extractor.extract(element))
            .collect::<Result<Vec<_>>>()?;

        let keys = self.policy.normalize(raw)?;
        debug_assert_eq!(keys.len(), data.len(), "normalize must keep one key per element");

        let mut indices: Vec<usize> = (0..keys.len()).collect();
        merge_sort(&mut indices, |a, b| {
            let ordering = self.policy.compare(&keys[a], &keys[b])?;
            Ok(self.direction.apply(ordering) == Ordering::Less)
        })?;
        Ok(indices)
    }

    /// Sorts `data` in place.
    ///
    /// On error `data` is left exactly as it was.
    pub fn sort<E>(&self, data: &mut [E]) -> Result<()>
    where
        X: KeyExtractor<E>,
        P: OrderingPolicy<X::Key>,
    {
        log::debug!(
            "sorting {} elements {:?} (extractor {}, policy {})",
            data.len(),
            self.direction,
            std::any::type_name::<X>(),
            std::any::type_name::<P>(),
        );
        let indices = self.sorted_indices(data)?;
        apply_permutation(data, indices);
        Ok(())
    }

    /// Returns a sorted copy of `data`, leaving the input untouched.
    pub fn sorted<E: Clone>(&self, data: &[E]) -> Result<Vec<E>>
    where
        X: KeyExtractor<E>,
        P: OrderingPolicy<X::Key>,
    {
        let indices = self.sorted_indices(data)?;
        Ok(indices.into_iter().map(|i| data[i].clone()).collect())
    }

    /// Sorts the items of a dynamic list in place.
    ///
    /// Fails with [`Error::UnsupportedKind`] when `value` is not a [`Value::List`].
    pub fn sort_value(&self, value: &mut Value) -> Result<()>
    where
        X: KeyExtractor<Value>,
        P: OrderingPolicy<X::Key>,
    {
        match value {
            Value::List(items) => self.sort(items),
            other => Err(Error::UnsupportedKind {
                expected: "list",
                found: other.kind_name(),
            }),
        }
    }
}

/// Moves `data[indices[i]]` to position `i` for every `i`, following each cycle of the
/// permutation once.
fn apply_permutation<T>(data: &mut [T], mut indices: Vec<usize>) {
    for i in 0..data.len() {
        let mut current = i;
        while indices[current] != i {
            let next = indices[current];
            data.swap(current, next);
            indices[current] = current; // Mark as placed
            current = next;
        }
        indices[current] = current;
    }
}

/// Stable merge sort over indices with a fallible `is_less`.
///
/// Short runs are insertion sorted, then runs are merged bottom-up through a scratch
/// buffer. The first comparison error stops the sort and is returned.
fn merge_sort<F>(v: &mut [usize], mut is_less: F) -> Result<()>
where
    F: FnMut(usize, usize) -> Result<bool>,
{
    let len = v.len();
    if len < 2 {
        return Ok(());
    }

    for chunk in v.chunks_mut(INSERTION_RUN) {
        insertion_sort(chunk, &mut is_less)?;
    }
    if len <= INSERTION_RUN {
        return Ok(());
    }

    let mut buf = Vec::with_capacity(len);
    let mut width = INSERTION_RUN;
    while width < len {
        let mut start = 0;
        while start + width < len {
            let mid = start + width;
            let end = (mid + width).min(len);
            merge(&mut v[start..end], mid - start, &mut buf, &mut is_less)?;
            start = end;
        }
        width *= 2;
    }
    Ok(())
}

fn insertion_sort<F>(v: &mut [usize], is_less: &mut F) -> Result<()>
where
    F: FnMut(usize, usize) -> Result<bool>,
{
    for i in 1..v.len() {
        let mut j = i;
        while j > 0 && is_less(v[j], v[j - 1])? {
            v.swap(j, j - 1);
            j -= 1;
        }
    }
    Ok(())
}

/// Merges the sorted runs `v[..mid]` and `v[mid..]`. Ties take from the left run.
fn merge<F>(v: &mut [usize], mid: usize, buf: &mut Vec<usize>, is_less: &mut F) -> Result<()>
where
    F: FnMut(usize, usize) -> Result<bool>,
{
    // Already in order: nothing to merge.
    if !is_less(v[mid], v[mid - 1])? {
        return Ok(());
    }

    buf.clear();
    buf.extend_from_slice(&v[..mid]);

    let (mut left, mut right, mut out) = (0, mid, 0);
    while left < buf.len() && right < v.len() {
        if is_less(v[right], buf[left])? {
            v[out] = v[right];
            right += 1;
        } else {
            v[out] = buf[left];
            left += 1;
        }
        out += 1;
    }
    // Whatever remains of the right run is already in place.
    while left < buf.len() {
        v[out] = buf[left];
        left += 1;
        out += 1;
    }
    Ok(())
}
