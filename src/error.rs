//! Error types
//!
//! Three things can go wrong with a validating type:
//!
//! - declaring it ([`DeclarationError`]): no validating ancestor, or
//!   attributes outside the allowed set,
//! - treating it as a value ([`InstantiationError`]),
//! - validating a value against it ([`ValidationError`]), either because the
//!   value has the wrong structural type or because a validator rejects it.
//!
//! [`Error`] wraps all three so callers can use `?` throughout.
//!
//! # Example
//!
//! ```rust
//! use vtypes::predicate::*;
//! use vtypes::{vtype, Failure, Kind};
//!
//! let positive = vtype("PositiveInt", Kind::Int, (non_negative(), "should be positive")).unwrap();
//!
//! let err = positive.validate("x", &(-1).into()).unwrap_err();
//! assert!(matches!(err.failure(), Failure::Value { .. }));
//! assert_eq!(err.failed_labels(), vec!["should be positive"]);
//! ```

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use crate::Value;

/// A user-chosen tag carried by every failure raised through a type.
///
/// Lets callers tell apart failures of different domain types without
/// matching on messages.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ErrorKind(Cow<'static, str>);

impl ErrorKind {
    /// Create an error kind.
    pub fn new(kind: impl Into<Cow<'static, str>>) -> Self {
        ErrorKind(kind.into())
    }

    /// The kind's name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for ErrorKind {
    fn from(kind: &'static str) -> Self {
        ErrorKind::new(kind)
    }
}

impl From<String> for ErrorKind {
    fn from(kind: String) -> Self {
        ErrorKind::new(kind)
    }
}

/// A type could not be declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclarationError {
    /// None of the declared parents is a validating type
    NoValidatingAncestor {
        /// Name of the type being declared
        name: String,
    },
    /// Attributes outside the allowed set were declared
    ExtraAttributes {
        /// Name of the type being declared
        name: String,
        /// The offending attribute names, sorted
        attrs: Vec<String>,
    },
}

impl DeclarationError {
    /// Name of the type whose declaration failed.
    pub fn type_name(&self) -> &str {
        match self {
            DeclarationError::NoValidatingAncestor { name }
            | DeclarationError::ExtraAttributes { name, .. } => name,
        }
    }
}

impl fmt::Display for DeclarationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclarationError::NoValidatingAncestor { name } => write!(
                f,
                "cannot declare validating type {}: it has no validating ancestor",
                name
            ),
            DeclarationError::ExtraAttributes { name, attrs } => write!(
                f,
                "cannot declare validating type {}: attributes not allowed on a validating type: {}",
                name,
                attrs.join(", ")
            ),
        }
    }
}

impl StdError for DeclarationError {}

/// A validating type was used as if it could produce a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstantiationError {
    /// Name of the type
    pub name: String,
}

impl fmt::Display for InstantiationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "validating type {} describes values and cannot be instantiated",
            self.name
        )
    }
}

impl StdError for InstantiationError {}

/// One rejected validator entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedCheck {
    /// Position of the entry in the validator
    pub index: usize,
    /// Label of the failing predicate, if it has one
    pub label: Option<String>,
}

impl fmt::Display for FailedCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => f.write_str(label),
            None => write!(f, "validator #{}", self.index),
        }
    }
}

/// Why a value was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// The value is not an instance of every structural type
    Type {
        /// Display names of the required types
        expected: Vec<String>,
    },
    /// The value has the right shape but validators rejected it
    Value {
        /// Every failing check, in validator order
        failed: Vec<FailedCheck>,
    },
}

/// A value failed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    name: String,
    // Boxed to keep `Result<_, ValidationError>` small
    value: Box<Value>,
    failure: Failure,
    help_msg: Option<String>,
    error_kind: Option<ErrorKind>,
}

impl ValidationError {
    /// Create a validation error for `value`, reported under `name`.
    pub fn new(name: impl Into<String>, value: Value, failure: Failure) -> Self {
        ValidationError {
            name: name.into(),
            value: Box::new(value),
            failure,
            help_msg: None,
            error_kind: None,
        }
    }

    /// Attach a help message.
    pub fn with_help_msg(mut self, help_msg: Option<String>) -> Self {
        self.help_msg = help_msg;
        self
    }

    /// Attach an error kind.
    pub fn with_error_kind(mut self, error_kind: Option<ErrorKind>) -> Self {
        self.error_kind = error_kind;
        self
    }

    /// The name the value was validated under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The rejected value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Why it was rejected.
    pub fn failure(&self) -> &Failure {
        &self.failure
    }

    /// Whether the value had the wrong structural type.
    pub fn is_type_failure(&self) -> bool {
        matches!(self.failure, Failure::Type { .. })
    }

    /// Whether a validator rejected the value.
    pub fn is_value_failure(&self) -> bool {
        matches!(self.failure, Failure::Value { .. })
    }

    /// Labels of the failing checks. Unlabeled checks are skipped.
    pub fn failed_labels(&self) -> Vec<&str> {
        match &self.failure {
            Failure::Type { .. } => Vec::new(),
            Failure::Value { failed } => failed.iter().filter_map(|c| c.label.as_deref()).collect(),
        }
    }

    /// The help message of the type that raised this error.
    pub fn help_msg(&self) -> Option<&str> {
        self.help_msg.as_deref()
    }

    /// The error kind of the type that raised this error.
    pub fn error_kind(&self) -> Option<&ErrorKind> {
        self.error_kind.as_ref()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(kind) = &self.error_kind {
            write!(f, "[{}] ", kind)?;
        }
        match &self.failure {
            Failure::Type { expected } => write!(
                f,
                "invalid type for {}={}: expected an instance of {}",
                self.name,
                self.value,
                expected.join(" and ")
            )?,
            Failure::Value { failed } => {
                write!(f, "invalid value for {}={}: failed ", self.name, self.value)?;
                for (i, check) in failed.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", check)?;
                }
            }
        }
        if let Some(help) = &self.help_msg {
            write!(f, ". {}", help)?;
        }
        Ok(())
    }
}

impl StdError for ValidationError {}

/// Any error raised by this crate.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// See [`DeclarationError`]
    Declaration(DeclarationError),
    /// See [`InstantiationError`]
    Instantiation(InstantiationError),
    /// See [`ValidationError`]
    Validation(ValidationError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Declaration(e) => e.fmt(f),
            Error::Instantiation(e) => e.fmt(f),
            Error::Validation(e) => e.fmt(f),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Declaration(e) => Some(e),
            Error::Instantiation(e) => Some(e),
            Error::Validation(e) => Some(e),
        }
    }
}

impl From<DeclarationError> for Error {
    fn from(e: DeclarationError) -> Self {
        Error::Declaration(e)
    }
}

impl From<InstantiationError> for Error {
    fn from(e: InstantiationError) -> Self {
        Error::Instantiation(e)
    }
}

impl From<ValidationError> for Error {
    fn from(e: ValidationError) -> Self {
        Error::Validation(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_failure(labels: &[Option<&str>]) -> Failure {
        Failure::Value {
            failed: labels
                .iter()
                .enumerate()
                .map(|(index, label)| FailedCheck {
                    index,
                    label: label.map(str::to_string),
                })
                .collect(),
        }
    }

    #[test]
    fn test_display_type_failure() {
        let err = ValidationError::new(
            "x",
            Value::from("1"),
            Failure::Type {
                expected: vec!["int".to_string()],
            },
        );
        assert_eq!(
            err.to_string(),
            r#"invalid type for x="1": expected an instance of int"#
        );
        assert!(err.is_type_failure());
        assert!(err.failed_labels().is_empty());
    }

    #[test]
    fn test_display_value_failure_with_help_and_kind() {
        let err = ValidationError::new("x", Value::from(-1), value_failure(&[Some("positive"), None]))
            .with_help_msg(Some("x must count something".to_string()))
            .with_error_kind(Some(ErrorKind::new("InvalidCount")));

        assert_eq!(
            err.to_string(),
            "[InvalidCount] invalid value for x=-1: failed positive, validator #1. x must count something"
        );
        assert_eq!(err.failed_labels(), vec!["positive"]);
        assert_eq!(err.error_kind().map(ErrorKind::as_str), Some("InvalidCount"));
    }

    #[test]
    fn test_validation_error_stays_small() {
        // Large values must not inflate every Result carrying the error
        assert!(std::mem::size_of::<ValidationError>() <= 128);

        let big = Value::from(vec![Value::from("a"); 64]);
        let err = ValidationError::new("x", big.clone(), value_failure(&[None]));
        assert_eq!(err.value(), &big);
    }

    #[test]
    fn test_declaration_error_display() {
        let err = DeclarationError::ExtraAttributes {
            name: "Foo".to_string(),
            attrs: vec!["a".to_string(), "b".to_string()],
        };
        assert!(err.to_string().ends_with("a, b"));
        assert_eq!(err.type_name(), "Foo");
    }

    #[test]
    fn test_umbrella_error_source() {
        let err: Error = InstantiationError {
            name: "Foo".to_string(),
        }
        .into();
        assert!(err.source().is_some());
        assert!(err.to_string().contains("cannot be instantiated"));
    }
}
