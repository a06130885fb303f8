//! Dynamic values.
//!
//! [`Value`] is a small self-describing data tree for callers whose element shapes are
//! only known at runtime (decoded documents, rows, records keyed by field name). It
//! plugs into the rest of the crate through [`FieldAccess`](crate::core::FieldAccess),
//! the `ByMapKey`/`ByIndex` extractors and the [`ValuePolicy`](crate::policy::ValuePolicy).
//!
//! [`Kind`] describes the declared shape of a destination for
//! [`copy_value_as`](crate::copy::copy_value_as).

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;

/// A dynamically typed value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Short name of the variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Builds a map value from `(name, value)` pairs.
    pub fn map<K, V, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Looks up `key` when this value is a map.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(map) => map.get(key),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Converts this value to `target`, widening or narrowing where that is lossless.
    ///
    /// `Int` widens to `Float`; `Float` narrows to `Int` only when it is integral and in
    /// range. Lists and maps convert element by element. Anything converts to
    /// [`Kind::Any`]. `position` names this value in a [`Error::TypeMismatch`].
    pub fn convert(&self, target: &Kind, position: &str) -> Result<Value> {
        let converted = match (self, target) {
            (_, Kind::Any) => self.clone(),
            (Value::Null, Kind::Null)
            | (Value::Bool(_), Kind::Bool)
            | (Value::Int(_), Kind::Int)
            | (Value::Float(_), Kind::Float)
            | (Value::Str(_), Kind::Str) => self.clone(),
            (Value::Int(i), Kind::Float) => Value::Float(*i as f64),
            (Value::Float(f), Kind::Int) if is_exact_i64(*f) => Value::Int(*f as i64),
            (Value::List(items), Kind::List(elem)) => Value::List(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| item.convert(elem, &format!("{position}[{i}]")))
                    .collect::<Result<_>>()?,
            ),
            (Value::Map(map), Kind::Map(elem)) => Value::Map(
                map.iter()
                    .map(|(k, v)| {
                        Ok::<_, Error>((k.clone(), v.convert(elem, &format!("{position}.{k}"))?))
                    })
                    .collect::<Result<_>>()?,
            ),
            _ => {
                return Err(Error::type_mismatch(
                    position,
                    self.kind_name(),
                    &target.to_string(),
                ));
            }
        };
        Ok(converted)
    }
}

fn is_exact_i64(f: f64) -> bool {
    // 2^63 is exactly representable; every integral float below it fits.
    f.fract() == 0.0 && f >= -9_223_372_036_854_775_808.0 && f < 9_223_372_036_854_775_808.0
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Map(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident as $target:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(<$target>::from(v))
                }
            }
        )*
    };
}

value_from! {
    bool => Bool as bool,
    i8 => Int as i64,
    i16 => Int as i64,
    i32 => Int as i64,
    i64 => Int as i64,
    u8 => Int as i64,
    u16 => Int as i64,
    u32 => Int as i64,
    f32 => Float as f64,
    f64 => Float as f64,
    String => Str as String,
    &str => Str as String,
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<V: Into<Value>> From<BTreeMap<String, V>> for Value {
    fn from(map: BTreeMap<String, V>) -> Self {
        Value::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl TryFrom<Value> for i64 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value.convert(&Kind::Int, "value")? {
            Value::Int(i) => Ok(i),
            other => Err(Error::type_mismatch("value", other.kind_name(), "int")),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value.convert(&Kind::Float, "value")? {
            Value::Float(x) => Ok(x),
            other => Err(Error::type_mismatch("value", other.kind_name(), "float")),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Str(s) => Ok(s),
            other => Err(Error::type_mismatch("value", other.kind_name(), "string")),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(Error::type_mismatch("value", other.kind_name(), "bool")),
        }
    }
}

/// Declared shape of a dynamic destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    Any,
    Null,
    Bool,
    Int,
    Float,
    Str,
    /// A list whose elements convert to the inner kind.
    List(Box<Kind>),
    /// A string-keyed map whose values convert to the inner kind.
    Map(Box<Kind>),
}

impl Kind {
    pub fn list_of(elem: Kind) -> Self {
        Kind::List(Box::new(elem))
    }

    pub fn map_of(elem: Kind) -> Self {
        Kind::Map(Box::new(elem))
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Any => f.write_str("any"),
            Kind::Null => f.write_str("null"),
            Kind::Bool => f.write_str("bool"),
            Kind::Int => f.write_str("int"),
            Kind::Float => f.write_str("float"),
            Kind::Str => f.write_str("string"),
            Kind::List(elem) => write!(f, "list<{elem}>"),
            Kind::Map(elem) => write!(f, "map<{elem}>"),
        }
    }
}
