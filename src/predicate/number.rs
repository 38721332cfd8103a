//! Number predicates
//!
//! Thresholds are stored as [`Value`]s. Integer values are compared exactly
//! against integer thresholds; any other numeric pair is compared as `f64`.
//! Non-numeric values never satisfy a number predicate.

use std::cmp::Ordering;

use super::combinators::Predicate;
use crate::Value;

fn num_cmp(value: &Value, threshold: &Value) -> Option<Ordering> {
    match (value.as_i64(), threshold.as_i64()) {
        (Some(a), Some(b)) => Some(a.cmp(&b)),
        _ => value.as_f64()?.partial_cmp(&threshold.as_f64()?),
    }
}

/// Predicate for numeric equality.
#[derive(Clone, Debug)]
pub struct Eq(pub Value);

impl Predicate<Value> for Eq {
    #[inline]
    fn check(&self, value: &Value) -> bool {
        num_cmp(value, &self.0) == Some(Ordering::Equal)
    }
}

/// Create a predicate that checks for numeric equality.
///
/// # Example
///
/// ```rust
/// use vtypes::predicate::*;
/// use vtypes::Value;
///
/// assert!(eq(5).check(&Value::from(5)));
/// assert!(eq(5).check(&Value::from(5.0)));
/// assert!(!eq(5).check(&Value::from("5")));
/// ```
pub fn eq(value: impl Into<Value>) -> Eq {
    Eq(value.into())
}

/// Predicate for greater than.
#[derive(Clone, Debug)]
pub struct Gt(pub Value);

impl Predicate<Value> for Gt {
    #[inline]
    fn check(&self, value: &Value) -> bool {
        num_cmp(value, &self.0) == Some(Ordering::Greater)
    }
}

/// Create a predicate that checks if value is greater than threshold.
///
/// # Example
///
/// ```rust
/// use vtypes::predicate::*;
/// use vtypes::Value;
///
/// assert!(gt(5).check(&Value::from(6)));
/// assert!(!gt(5).check(&Value::from(5)));
/// ```
pub fn gt(value: impl Into<Value>) -> Gt {
    Gt(value.into())
}

/// Predicate for greater than or equal.
#[derive(Clone, Debug)]
pub struct Ge(pub Value);

impl Predicate<Value> for Ge {
    #[inline]
    fn check(&self, value: &Value) -> bool {
        matches!(
            num_cmp(value, &self.0),
            Some(Ordering::Greater | Ordering::Equal)
        )
    }
}

/// Create a predicate that checks if value is at least threshold.
pub fn ge(value: impl Into<Value>) -> Ge {
    Ge(value.into())
}

/// Predicate for less than.
#[derive(Clone, Debug)]
pub struct Lt(pub Value);

impl Predicate<Value> for Lt {
    #[inline]
    fn check(&self, value: &Value) -> bool {
        num_cmp(value, &self.0) == Some(Ordering::Less)
    }
}

/// Create a predicate that checks if value is less than threshold.
pub fn lt(value: impl Into<Value>) -> Lt {
    Lt(value.into())
}

/// Predicate for less than or equal.
#[derive(Clone, Debug)]
pub struct Le(pub Value);

impl Predicate<Value> for Le {
    #[inline]
    fn check(&self, value: &Value) -> bool {
        matches!(num_cmp(value, &self.0), Some(Ordering::Less | Ordering::Equal))
    }
}

/// Create a predicate that checks if value is at most threshold.
pub fn le(value: impl Into<Value>) -> Le {
    Le(value.into())
}

/// Predicate for an inclusive numeric range.
#[derive(Clone, Debug)]
pub struct Between {
    min: Value,
    max: Value,
}

impl Predicate<Value> for Between {
    #[inline]
    fn check(&self, value: &Value) -> bool {
        matches!(
            num_cmp(value, &self.min),
            Some(Ordering::Greater | Ordering::Equal)
        ) && matches!(
            num_cmp(value, &self.max),
            Some(Ordering::Less | Ordering::Equal)
        )
    }
}

/// Create a predicate that checks if value is in `[min, max]`.
///
/// # Example
///
/// ```rust
/// use vtypes::predicate::*;
/// use vtypes::Value;
///
/// let pct = between(0, 100);
/// assert!(pct.check(&Value::from(0)));
/// assert!(pct.check(&Value::from(99.5)));
/// assert!(!pct.check(&Value::from(101)));
/// ```
pub fn between(min: impl Into<Value>, max: impl Into<Value>) -> Between {
    Between {
        min: min.into(),
        max: max.into(),
    }
}

/// Value must be > 0.
pub fn positive() -> Gt {
    gt(0)
}

/// Value must be < 0.
pub fn negative() -> Lt {
    lt(0)
}

/// Value must be >= 0.
pub fn non_negative() -> Ge {
    ge(0)
}
