//! Testing utilities for validating types
//!
//! Assertion macros that print *why* a value was (or was not) accepted, and
//! with the `proptest` feature, an `Arbitrary` implementation for [`Value`].
//!
//! # Examples
//!
//! ```rust
//! use vtypes::predicate::*;
//! use vtypes::{assert_instance, assert_invalid, assert_not_instance, vtype, Kind};
//!
//! let positive = vtype("Positive", Kind::Int, (gt(0), "should be positive")).unwrap();
//!
//! assert_instance!(positive, 3);
//! assert_not_instance!(positive, -3);
//! assert_invalid!(positive, -3, ["should be positive"]);
//! ```

#[cfg(feature = "proptest")]
use crate::Value;

/// Assert that a value is an instance of a validating type.
///
/// On failure, the panic message contains the validation error.
///
/// # Example
///
/// ```rust
/// use vtypes::{assert_instance, vtype, Kind};
///
/// let any_str = vtype("AnyStr", Kind::Str, ()).unwrap();
/// assert_instance!(any_str, "hello");
/// ```
#[macro_export]
macro_rules! assert_instance {
    ($vtype:expr, $value:expr) => {
        let value = $crate::Value::from($value);
        if let Err(e) = $vtype.assert_valid("value", &value) {
            panic!(
                "Expected {} to be an instance of {}, got: {}",
                value,
                $vtype.name(),
                e
            );
        }
    };
}

/// Assert that a value is not an instance of a validating type.
///
/// # Example
///
/// ```rust
/// use vtypes::{assert_not_instance, vtype, Kind};
///
/// let any_str = vtype("AnyStr", Kind::Str, ()).unwrap();
/// assert_not_instance!(any_str, 42);
/// ```
#[macro_export]
macro_rules! assert_not_instance {
    ($vtype:expr, $value:expr) => {
        let value = $crate::Value::from($value);
        if $vtype.is_instance(&value) {
            panic!(
                "Expected {} not to be an instance of {}",
                value,
                $vtype.name()
            );
        }
    };
}

/// Assert that a value fails value validation with the given labels.
///
/// # Example
///
/// ```rust
/// use vtypes::predicate::*;
/// use vtypes::{assert_invalid, validators, vtype, Kind};
///
/// let t = vtype("Small", Kind::Int, validators! { "positive" => gt(0), "small" => lt(10) }).unwrap();
/// assert_invalid!(t, -20, ["positive"]);
/// assert_invalid!(t, 20, ["small"]);
/// ```
#[macro_export]
macro_rules! assert_invalid {
    ($vtype:expr, $value:expr, [$($label:expr),* $(,)?]) => {
        let value = $crate::Value::from($value);
        match $vtype.assert_valid("value", &value) {
            Ok(()) => panic!(
                "Expected {} to fail validation of {}, but it passed",
                value,
                $vtype.name()
            ),
            Err(e) => {
                let expected: ::std::vec::Vec<&str> = ::std::vec![$($label),*];
                assert_eq!(e.failed_labels(), expected, "unexpected failures: {}", e);
            }
        }
    };
}

#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
impl Arbitrary for Value {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::Int),
            any::<f64>().prop_map(Value::Float),
            ".{0,8}".prop_map(Value::Str),
            prop::collection::vec(any::<u8>(), 0..8).prop_map(Value::Bytes),
        ];
        leaf.prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::List),
                prop::collection::btree_map(".{0,4}", inner, 0..4).prop_map(Value::Map),
            ]
        })
        .boxed()
    }
}
