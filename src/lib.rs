//! # vtypes
//!
//! Validating types: runtime type descriptors that fuse structural type
//! checks with value validators.
//!
//! A [`VType`] is a type you can *ask questions of*. A value is an instance
//! of it only if it has the right shape (every structural type accepts it)
//! and the right content (every validator accepts it). Validating types
//! compose: deriving from one inherits its structural types and validators,
//! flattened once at declaration time.
//!
//! ## Quick Example
//!
//! ```rust
//! use vtypes::predicate::*;
//! use vtypes::{validators, vtype, Kind, VType, Value};
//!
//! // A type from a structural type and a labeled validator
//! let positive_int = vtype(
//!     "PositiveInt",
//!     Kind::Int,
//!     validators! { "should be positive" => non_negative() },
//! )
//! .unwrap();
//!
//! assert!(positive_int.is_instance(&Value::from(1)));
//! assert!(!positive_int.is_instance(&Value::from(-1)));
//! assert!(!positive_int.is_instance(&Value::from("1")));
//!
//! // Errors say what went wrong
//! let err = positive_int.validate("x", &Value::from(-1)).unwrap_err();
//! assert_eq!(err.failed_labels(), vec!["should be positive"]);
//!
//! // A type with validators only, then a subtype adding a structural type
//! let non_empty = VType::declare("NonEmpty")
//!     .validators(validators! { "should be non empty" => not_empty() })
//!     .build()
//!     .unwrap();
//! let non_empty_str = non_empty.derive("NonEmptyStr").parent(Kind::Str).build().unwrap();
//!
//! assert!(non_empty_str.is_instance(&Value::from("hoho")));
//! assert!(!non_empty_str.is_instance(&Value::from("")));
//! assert!(!non_empty_str.is_instance(&Value::from(1)));
//! ```
//!
//! ## Feature flags
//!
//! - `tracing`: log composition and rejections with [`tracing`](https://docs.rs/tracing).
//! - `serde`: (de)serialize [`Value`], to check decoded documents.
//! - `proptest`: `Arbitrary` for [`Value`], for property tests of your own types.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod predicate;
pub mod testing;
pub mod validator;
pub mod validators;
pub mod value;
pub mod vtype;

#[cfg(feature = "serde")]
mod serde_impl;

// Re-exports
pub use error::{
    DeclarationError, Error, ErrorKind, FailedCheck, Failure, InstantiationError, ValidationError,
};
pub use validator::Validator;
pub use validators::{normalize, IntoValidatorSpec, SharedPredicate, ValidatorEntry, ValidatorSpec};
pub use value::{Kind, Value};
pub use vtype::{is_subtype, vtype, IntoTypes, TypeRef, VType, VTypeDecl};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{DeclarationError, Error, ErrorKind, ValidationError};
    pub use crate::predicate::{Predicate, PredicateExt};
    pub use crate::validators;
    pub use crate::validators::{IntoValidatorSpec, ValidatorSpec};
    pub use crate::value::{Kind, Value};
    pub use crate::vtype::{is_subtype, vtype, TypeRef, VType, VTypeDecl};
}
