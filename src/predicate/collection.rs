//! Length and element predicates
//!
//! These apply to every sized value (strings, bytes, lists and maps). String
//! length is counted in characters. Scalars have no length and fail.

use super::combinators::Predicate;
use crate::Value;

/// Predicate that checks if a sized value is not empty.
#[derive(Clone, Copy, Default, Debug)]
pub struct NotEmpty;

impl Predicate<Value> for NotEmpty {
    #[inline]
    fn check(&self, value: &Value) -> bool {
        value.is_empty() == Some(false)
    }
}

/// Create a predicate that checks if a sized value is not empty.
///
/// # Example
///
/// ```rust
/// use vtypes::predicate::*;
/// use vtypes::Value;
///
/// assert!(not_empty().check(&Value::from("hello")));
/// assert!(not_empty().check(&Value::from(vec![1])));
/// assert!(!not_empty().check(&Value::from("")));
/// assert!(!not_empty().check(&Value::from(1)));
/// ```
pub fn not_empty() -> NotEmpty {
    NotEmpty
}

/// Predicate that checks a length is in range.
#[derive(Clone, Copy, Debug)]
pub struct LenBetween {
    min: usize,
    max: usize,
}

impl Predicate<Value> for LenBetween {
    #[inline]
    fn check(&self, value: &Value) -> bool {
        value
            .len()
            .is_some_and(|len| len >= self.min && len <= self.max)
    }
}

/// Create a predicate that checks if length is between min and max (inclusive).
///
/// # Example
///
/// ```rust
/// use vtypes::predicate::*;
/// use vtypes::Value;
///
/// let p = len_between(3, 10);
/// assert!(!p.check(&Value::from("ab")));
/// assert!(p.check(&Value::from("abc")));
/// assert!(p.check(&Value::from(vec![1, 2, 3, 4])));
/// ```
pub fn len_between(min: usize, max: usize) -> LenBetween {
    LenBetween { min, max }
}

/// Create a predicate that checks if length is at least min.
pub fn len_min(min: usize) -> LenBetween {
    LenBetween {
        min,
        max: usize::MAX,
    }
}

/// Create a predicate that checks if length is at most max.
pub fn len_max(max: usize) -> LenBetween {
    LenBetween { min: 0, max }
}

/// Create a predicate that checks if length is exactly len.
pub fn len_eq(len: usize) -> LenBetween {
    LenBetween { min: len, max: len }
}

/// Predicate that checks every element of a list.
#[derive(Clone, Copy, Debug)]
pub struct Each<P>(pub P);

impl<P: Predicate<Value>> Predicate<Value> for Each<P> {
    #[inline]
    fn check(&self, value: &Value) -> bool {
        match value {
            Value::List(items) => items.iter().all(|item| self.0.check(item)),
            _ => false,
        }
    }
}

/// Create a predicate that checks every element of a list.
///
/// Only lists match; an empty list always does.
///
/// # Example
///
/// ```rust
/// use vtypes::predicate::*;
/// use vtypes::Value;
///
/// let all_positive = each(gt(0));
/// assert!(all_positive.check(&Value::from(vec![1, 2, 3])));
/// assert!(!all_positive.check(&Value::from(vec![1, -2])));
/// ```
pub fn each<P: Predicate<Value>>(predicate: P) -> Each<P> {
    Each(predicate)
}

/// Predicate that checks a map has a key.
#[derive(Clone, Debug)]
pub struct HasKey(pub String);

impl Predicate<Value> for HasKey {
    #[inline]
    fn check(&self, value: &Value) -> bool {
        match value {
            Value::Map(map) => map.contains_key(&self.0),
            _ => false,
        }
    }
}

/// Create a predicate that checks a map contains `key`.
pub fn has_key(key: impl Into<String>) -> HasKey {
    HasKey(key.into())
}
