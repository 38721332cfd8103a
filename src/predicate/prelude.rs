//! Predicate prelude for convenient imports
//!
//! # Example
//!
//! ```rust
//! use vtypes::predicate::prelude::*;
//! use vtypes::Value;
//!
//! let valid_age = ge(0).and(le(150));
//! assert!(valid_age.check(&Value::from(25)));
//! ```

pub use super::combinators::{of_kind, Predicate, PredicateExt};

pub use super::number::{between, eq, ge, gt, le, lt, negative, non_negative, positive};

pub use super::string::{all_chars, contains, ends_with, is_alphanumeric, starts_with};

pub use super::collection::{
    each, has_key, len_between, len_eq, len_max, len_min, not_empty,
};
