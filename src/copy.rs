//! Container copies, with optional element conversion.
//!
//! - [`Container::copy`] duplicates a sequence or mapping one level deep.
//! - [`CopyInto::copy_into`] fills a destination of a possibly different element type,
//!   converting every element (or every key and value) with `TryFrom`.
//! - [`copy_value`] and [`copy_value_as`] do the same for dynamic [`Value`]s, where the
//!   container kind is only known at runtime.
//!
//! A failed conversion aborts the whole copy and leaves the destination untouched.

use crate::error::{Error, Result};
use crate::value::{Kind, Value};
use std::any::type_name;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt::Debug;
use std::hash::{BuildHasher, Hash};

/// Shallow, same-shape duplication.
///
/// Elements are cloned individually; anything they point to through `Rc`/`Arc` is
/// shared, not duplicated.
pub trait Container {
    type Output;

    fn copy(&self) -> Self::Output;
}

impl<T: Clone> Container for [T] {
    type Output = Vec<T>;

    fn copy(&self) -> Vec<T> {
        self.to_vec()
    }
}

impl<T: Clone, const N: usize> Container for [T; N] {
    type Output = [T; N];

    fn copy(&self) -> [T; N] {
        self.clone()
    }
}

impl<T: Clone> Container for Vec<T> {
    type Output = Vec<T>;

    fn copy(&self) -> Vec<T> {
        self.clone()
    }
}

impl<T: Clone> Container for VecDeque<T> {
    type Output = VecDeque<T>;

    fn copy(&self) -> VecDeque<T> {
        self.clone()
    }
}

impl<K: Clone, V: Clone, S: Clone> Container for HashMap<K, V, S> {
    type Output = HashMap<K, V, S>;

    fn copy(&self) -> Self {
        self.clone()
    }
}

impl<K: Clone, V: Clone> Container for BTreeMap<K, V> {
    type Output = BTreeMap<K, V>;

    fn copy(&self) -> Self {
        self.clone()
    }
}

/// Copies `self` into `dst`, converting each element to the destination's element type.
///
/// The destination is replaced: afterwards it has exactly the source's length (or key
/// set). If any element fails to convert, [`Error::TypeMismatch`] names it and `dst`
/// keeps its previous contents.
///
/// ```
/// use keysort::CopyInto;
///
/// let src = [1i32, 2, 3];
/// let mut dst: Vec<f64> = Vec::new();
/// src.copy_into(&mut dst)?;
/// assert_eq!(dst, vec![1.0, 2.0, 3.0]);
/// # Ok::<(), keysort::Error>(())
/// ```
pub trait CopyInto<D> {
    fn copy_into(&self, dst: &mut D) -> Result<()>;
}

fn convert_at<S, D>(item: &S, position: impl FnOnce() -> String) -> Result<D>
where
    S: Clone,
    D: TryFrom<S>,
{
    D::try_from(item.clone())
        .map_err(|_| Error::type_mismatch(position(), type_name::<S>(), type_name::<D>()))
}

fn convert_seq<'a, S, D, I>(items: I) -> Result<Vec<D>>
where
    S: Clone + 'a,
    D: TryFrom<S>,
    I: IntoIterator<Item = &'a S>,
{
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| convert_at(item, || format!("index {i}")))
        .collect()
}

fn convert_pairs<'a, KS, VS, KD, VD, I, C>(entries: I) -> Result<C>
where
    KS: Clone + Debug + 'a,
    VS: Clone + 'a,
    KD: TryFrom<KS>,
    VD: TryFrom<VS>,
    I: IntoIterator<Item = (&'a KS, &'a VS)>,
    C: FromIterator<(KD, VD)>,
{
    entries
        .into_iter()
        .map(|(k, v)| {
            let key = convert_at(k, || format!("key {k:?}"))?;
            let value = convert_at(v, || format!("value of key {k:?}"))?;
            Ok::<_, Error>((key, value))
        })
        .collect()
}

fn log_copy<S: ?Sized, D>(len: usize) {
    log::debug!("copying {len} items from {} into {}", type_name::<S>(), type_name::<D>());
}

impl<S: Clone, D: TryFrom<S>> CopyInto<Vec<D>> for [S] {
    fn copy_into(&self, dst: &mut Vec<D>) -> Result<()> {
        log_copy::<Self, Vec<D>>(self.len());
        *dst = convert_seq(self)?;
        Ok(())
    }
}

impl<S: Clone, D: TryFrom<S>, const N: usize> CopyInto<Vec<D>> for [S; N] {
    fn copy_into(&self, dst: &mut Vec<D>) -> Result<()> {
        self.as_slice().copy_into(dst)
    }
}

impl<S: Clone, D: TryFrom<S>> CopyInto<Vec<D>> for Vec<S> {
    fn copy_into(&self, dst: &mut Vec<D>) -> Result<()> {
        self.as_slice().copy_into(dst)
    }
}

impl<S: Clone, D: TryFrom<S>> CopyInto<VecDeque<D>> for VecDeque<S> {
    fn copy_into(&self, dst: &mut VecDeque<D>) -> Result<()> {
        log_copy::<Self, VecDeque<D>>(self.len());
        *dst = convert_seq(self)?.into();
        Ok(())
    }
}

impl<KS, VS, KD, VD, SS, SD> CopyInto<HashMap<KD, VD, SD>> for HashMap<KS, VS, SS>
where
    KS: Clone + Debug,
    VS: Clone,
    KD: TryFrom<KS> + Hash + Eq,
    VD: TryFrom<VS>,
    SD: BuildHasher + Default,
{
    fn copy_into(&self, dst: &mut HashMap<KD, VD, SD>) -> Result<()> {
        log_copy::<Self, HashMap<KD, VD, SD>>(self.len());
        *dst = convert_pairs(self)?;
        Ok(())
    }
}

impl<KS, VS, KD, VD> CopyInto<BTreeMap<KD, VD>> for BTreeMap<KS, VS>
where
    KS: Clone + Debug,
    VS: Clone,
    KD: TryFrom<KS> + Ord,
    VD: TryFrom<VS>,
{
    fn copy_into(&self, dst: &mut BTreeMap<KD, VD>) -> Result<()> {
        log_copy::<Self, BTreeMap<KD, VD>>(self.len());
        *dst = convert_pairs(self)?;
        Ok(())
    }
}

impl<KS, VS, KD, VD, SS> CopyInto<BTreeMap<KD, VD>> for HashMap<KS, VS, SS>
where
    KS: Clone + Debug,
    VS: Clone,
    KD: TryFrom<KS> + Ord,
    VD: TryFrom<VS>,
{
    fn copy_into(&self, dst: &mut BTreeMap<KD, VD>) -> Result<()> {
        log_copy::<Self, BTreeMap<KD, VD>>(self.len());
        *dst = convert_pairs(self)?;
        Ok(())
    }
}

impl<KS, VS, KD, VD, SD> CopyInto<HashMap<KD, VD, SD>> for BTreeMap<KS, VS>
where
    KS: Clone + Debug,
    VS: Clone,
    KD: TryFrom<KS> + Hash + Eq,
    VD: TryFrom<VS>,
    SD: BuildHasher + Default,
{
    fn copy_into(&self, dst: &mut HashMap<KD, VD, SD>) -> Result<()> {
        log_copy::<Self, HashMap<KD, VD, SD>>(self.len());
        *dst = convert_pairs(self)?;
        Ok(())
    }
}

/// Duplicates a dynamic list or map one level deep.
///
/// Scalars are rejected with [`Error::UnsupportedKind`].
pub fn copy_value(src: &Value) -> Result<Value> {
    match src {
        Value::List(_) | Value::Map(_) => Ok(src.clone()),
        other => Err(Error::UnsupportedKind {
            expected: "list or map",
            found: other.kind_name(),
        }),
    }
}

/// Copies a dynamic list or map into a container of the declared kind `target`.
///
/// `target` must be [`Kind::List`] or [`Kind::Map`]; the source must have the same
/// shape. Each element (or map value) is converted to the declared element kind by the
/// rules of [`Value::convert`].
///
/// ```
/// use keysort::{copy_value_as, Kind, Value};
///
/// let src = Value::from(vec![1, 2, 3]);
/// let dst = copy_value_as(&src, &Kind::list_of(Kind::Float))?;
/// assert_eq!(dst, Value::from(vec![1.0, 2.0, 3.0]));
/// # Ok::<(), keysort::Error>(())
/// ```
pub fn copy_value_as(src: &Value, target: &Kind) -> Result<Value> {
    let expected = match target {
        Kind::List(_) => "list",
        Kind::Map(_) => "map",
        other => {
            return Err(Error::InvalidDestination {
                found: other.to_string(),
            });
        }
    };
    match (src, target) {
        (Value::List(items), Kind::List(_)) => {
            log_copy::<Value, Kind>(items.len());
            src.convert(target, "root")
        }
        (Value::Map(map), Kind::Map(_)) => {
            log_copy::<Value, Kind>(map.len());
            src.convert(target, "root")
        }
        (other, _) => Err(Error::UnsupportedKind {
            expected,
            found: other.kind_name(),
        }),
    }
}
