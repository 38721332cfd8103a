//! Predicate combinators for validators
//!
//! A validator is a predicate over a [`Value`](crate::Value). Any
//! `Fn(&Value) -> bool + Send + Sync` closure qualifies, and this module adds
//! reusable predicates plus the `and` / `or` / `not` combinators so that
//! validators can be assembled from small pieces.
//!
//! # Example
//!
//! ```rust
//! use vtypes::predicate::*;
//! use vtypes::Value;
//!
//! let username = len_between(3, 20).and(is_alphanumeric());
//!
//! assert!(username.check(&Value::from("john")));
//! assert!(!username.check(&Value::from("ab")));
//! assert!(!username.check(&Value::from("no-hyphens")));
//! ```
//!
//! # Use in a validating type
//!
//! ```rust
//! use vtypes::{predicate::*, vtype, Kind, ValidatorSpec};
//!
//! let percentage = vtype(
//!     "Percentage",
//!     Kind::Number,
//!     ValidatorSpec::labeled(between(0, 100), "should be between 0 and 100"),
//! )
//! .unwrap();
//!
//! assert!(percentage.is_instance(&50.into()));
//! assert!(!percentage.is_instance(&150.into()));
//! ```

mod collection;
mod combinators;
mod number;
mod string;

pub mod prelude;

pub use combinators::{of_kind, And, Not, OfKind, Or, Predicate, PredicateExt};

pub use number::{
    between, eq, ge, gt, le, lt, negative, non_negative, positive, Between, Eq, Ge, Gt, Le, Lt,
};

pub use string::{
    all_chars, contains, ends_with, is_alphanumeric, starts_with, AllChars, Contains, EndsWith,
    StartsWith,
};

pub use collection::{
    each, has_key, len_between, len_eq, len_max, len_min, not_empty, Each, HasKey, LenBetween,
    NotEmpty,
};
