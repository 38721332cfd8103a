//! Compiled validators
//!
//! A [`Validator`] is built once from a normalized entry sequence and then
//! evaluated against any number of values. It is immutable and cheap to
//! clone, so one validator can be shared across threads.
//!
//! # Example
//!
//! ```rust
//! use vtypes::predicate::*;
//! use vtypes::{normalize, validators, Validator, Value};
//!
//! let validator = Validator::new(normalize(&validators! {
//!     "should be positive" => gt(0),
//!     "should be even" => |v: &Value| v.as_i64().is_some_and(|i| i % 2 == 0),
//! }))
//! .with_help_msg("quantities come in pairs");
//!
//! assert!(validator.is_valid(&Value::from(4)));
//!
//! let err = validator.assert_valid("qty", &Value::from(-3)).unwrap_err();
//! assert_eq!(err.failed_labels(), vec!["should be positive", "should be even"]);
//! assert_eq!(err.help_msg(), Some("quantities come in pairs"));
//! ```

use std::sync::Arc;

use crate::error::{ErrorKind, FailedCheck, Failure, ValidationError};
use crate::validators::ValidatorEntry;
use crate::Value;

/// An immutable validator over a fixed entry sequence.
#[derive(Debug, Clone)]
pub struct Validator {
    entries: Arc<[ValidatorEntry]>,
    help_msg: Option<String>,
    error_kind: Option<ErrorKind>,
}

impl Validator {
    /// Compile a validator from normalized entries.
    ///
    /// A validator with no entries accepts every value.
    pub fn new(entries: Vec<ValidatorEntry>) -> Self {
        Validator {
            entries: entries.into(),
            help_msg: None,
            error_kind: None,
        }
    }

    /// Help message attached to every failure.
    pub fn with_help_msg(mut self, help_msg: impl Into<String>) -> Self {
        self.help_msg = Some(help_msg.into());
        self
    }

    /// Error kind attached to every failure.
    pub fn with_error_kind(mut self, error_kind: impl Into<ErrorKind>) -> Self {
        self.error_kind = Some(error_kind.into());
        self
    }

    pub(crate) fn with_options(
        mut self,
        help_msg: Option<String>,
        error_kind: Option<ErrorKind>,
    ) -> Self {
        self.help_msg = help_msg;
        self.error_kind = error_kind;
        self
    }

    /// The entries this validator evaluates, in order.
    pub fn entries(&self) -> &[ValidatorEntry] {
        &self.entries
    }

    /// Whether every entry accepts `value`. Stops at the first rejection.
    #[inline]
    pub fn is_valid(&self, value: &Value) -> bool {
        self.entries.iter().all(|entry| entry.accepts(value))
    }

    /// Every failing check for `value`, in entry order.
    pub fn failures(&self, value: &Value) -> Vec<FailedCheck> {
        self.entries
            .iter()
            .enumerate()
            .flat_map(|(index, entry)| {
                entry
                    .failures(value)
                    .into_iter()
                    .map(move |label| FailedCheck {
                        index,
                        label: label.map(str::to_string),
                    })
            })
            .collect()
    }

    /// Validate `value`, reported under `name`.
    ///
    /// All entries are evaluated so that the error lists every failing
    /// check.
    pub fn assert_valid(&self, name: &str, value: &Value) -> Result<(), ValidationError> {
        let failed = self.failures(value);
        if failed.is_empty() {
            return Ok(());
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(name, failed = failed.len(), "value rejected by validator");

        Err(ValidationError::new(name, value.clone(), Failure::Value { failed })
            .with_help_msg(self.help_msg.clone())
            .with_error_kind(self.error_kind.clone()))
    }
}
