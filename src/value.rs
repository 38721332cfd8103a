//! Dynamic values and their structural kinds
//!
//! Validating types check *runtime* values, so this module provides the value
//! model they operate on: [`Value`], an owned dynamically-typed value, and
//! [`Kind`], the plain structural types a value can be an instance of.
//!
//! Kinds form a small hierarchy, the same way built-in classes do in a dynamic
//! language:
//!
//! ```text
//! Any
//! ├── Null
//! ├── Number
//! │   ├── Int
//! │   │   └── Bool
//! │   └── Float
//! └── Sized
//!     ├── Str
//!     ├── Bytes
//!     ├── List
//!     └── Map
//! ```
//!
//! # Example
//!
//! ```rust
//! use vtypes::{Kind, Value};
//!
//! let v = Value::from(42);
//! assert_eq!(v.kind(), Kind::Int);
//! assert!(Kind::Number.accepts(&v));
//! assert!(!Kind::Str.accepts(&v));
//! ```

use std::collections::BTreeMap;
use std::fmt;

/// An owned, dynamically-typed value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// The absence of a value
    #[default]
    Null,
    /// A boolean
    Bool(bool),
    /// A signed integer
    Int(i64),
    /// A floating point number
    Float(f64),
    /// A UTF-8 string
    Str(String),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// An ordered sequence of values
    List(Vec<Value>),
    /// A string-keyed map of values
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// The most specific kind of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::Str(_) => Kind::Str,
            Value::Bytes(_) => Kind::Bytes,
            Value::List(_) => Kind::List,
            Value::Map(_) => Kind::Map,
        }
    }

    /// Length of a sized value, `None` for scalars.
    ///
    /// Strings report their length in characters.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vtypes::Value;
    ///
    /// assert_eq!(Value::from("héllo").len(), Some(5));
    /// assert_eq!(Value::from(vec![1, 2]).len(), Some(2));
    /// assert_eq!(Value::from(3).len(), None);
    /// ```
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Str(s) => Some(s.chars().count()),
            Value::Bytes(b) => Some(b.len()),
            Value::List(l) => Some(l.len()),
            Value::Map(m) => Some(m.len()),
            _ => None,
        }
    }

    /// `Some(true)` for empty sized values, `None` for scalars.
    pub fn is_empty(&self) -> Option<bool> {
        self.len().map(|n| n == 0)
    }

    /// Numeric view of the value. Booleans count as 0 and 1.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Integer view of the value. Booleans count as 0 and 1.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Bool(b) => Some(i64::from(*b)),
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// String view of the value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this is [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Bytes(b) => write!(f, "b{:?}", b),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Map(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}: {}", k, v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Int(i64::from(v))
                }
            }
        )+
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<BTreeMap<String, T>> for Value {
    fn from(v: BTreeMap<String, T>) -> Self {
        Value::Map(v.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// A plain structural type: the shape of a value, independent of its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    /// Every value
    Any,
    /// `Value::Null`
    Null,
    /// Booleans (a subkind of `Int`)
    Bool,
    /// Integers, including booleans
    Int,
    /// Floating point numbers
    Float,
    /// Integers and floats
    Number,
    /// Strings
    Str,
    /// Byte strings
    Bytes,
    /// Lists
    List,
    /// Maps
    Map,
    /// Anything with a length
    Sized,
}

impl Kind {
    /// The direct parent kind, `None` for `Any`.
    pub fn parent(self) -> Option<Kind> {
        match self {
            Kind::Any => None,
            Kind::Null | Kind::Number | Kind::Sized => Some(Kind::Any),
            Kind::Bool => Some(Kind::Int),
            Kind::Int | Kind::Float => Some(Kind::Number),
            Kind::Str | Kind::Bytes | Kind::List | Kind::Map => Some(Kind::Sized),
        }
    }

    /// Whether `self` is `other` or one of its descendants.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vtypes::Kind;
    ///
    /// assert!(Kind::Bool.is_subkind_of(Kind::Number));
    /// assert!(Kind::Str.is_subkind_of(Kind::Any));
    /// assert!(!Kind::Number.is_subkind_of(Kind::Int));
    /// ```
    pub fn is_subkind_of(self, other: Kind) -> bool {
        let mut current = Some(self);
        while let Some(kind) = current {
            if kind == other {
                return true;
            }
            current = kind.parent();
        }
        false
    }

    /// Structural instance check: is `value` of this kind?
    #[inline]
    pub fn accepts(self, value: &Value) -> bool {
        value.kind().is_subkind_of(self)
    }

    /// Lowercase display name.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Any => "any",
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::Number => "number",
            Kind::Str => "str",
            Kind::Bytes => "bytes",
            Kind::List => "list",
            Kind::Map => "map",
            Kind::Sized => "sized",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
