//! Validator specifications and their normalization
//!
//! Validators can be declared in several shapes: a single predicate, a
//! `(predicate, label)` pair, a mapping from label to predicate, or a list
//! of any of these. [`ValidatorSpec`] is the tagged union of those shapes and
//! [`normalize`] flattens one into the canonical ordered sequence of
//! [`ValidatorEntry`] that a [`Validator`](crate::Validator) is compiled from.
//!
//! # Shapes
//!
//! ```rust
//! use vtypes::predicate::*;
//! use vtypes::{validators, ValidatorSpec, Value};
//!
//! // one unlabeled predicate
//! let a = ValidatorSpec::single(gt(0));
//!
//! // one labeled predicate
//! let b = ValidatorSpec::labeled(gt(0), "should be positive");
//!
//! // a group: failures report which label failed
//! let c = validators! {
//!     "should be positive" => gt(0),
//!     "should be small" => lt(100),
//! };
//!
//! // a list mixing all of the above
//! let d = validators![gt(0), (lt(100), "should be small"), c];
//! assert_eq!(vtypes::normalize(&d).len(), 3);
//! ```
//!
//! A 2-tuple is always a `(predicate, label)` pair, a list is always a list of
//! entries, and a list of two predicates therefore yields two entries.

use std::fmt;
use std::sync::Arc;

use crate::predicate::Predicate;
use crate::Value;

/// A type-erased, shareable predicate over [`Value`].
pub type SharedPredicate = Arc<dyn Predicate<Value>>;

/// A validator declaration, in one of the accepted shapes.
#[derive(Clone, Default)]
pub enum ValidatorSpec {
    /// No validators
    #[default]
    None,
    /// A single unlabeled predicate
    Single(SharedPredicate),
    /// A single predicate with a failure label
    Labeled(SharedPredicate, String),
    /// Labeled predicates evaluated as one group, in insertion order
    Mapping(Vec<(String, SharedPredicate)>),
    /// Any number of specs, in order
    List(Vec<ValidatorSpec>),
}

impl ValidatorSpec {
    /// A single unlabeled predicate.
    pub fn single<P: Predicate<Value> + 'static>(predicate: P) -> Self {
        ValidatorSpec::Single(Arc::new(predicate))
    }

    /// A single predicate whose failures are reported under `label`.
    pub fn labeled<P: Predicate<Value> + 'static>(predicate: P, label: impl Into<String>) -> Self {
        ValidatorSpec::Labeled(Arc::new(predicate), label.into())
    }

    /// A group of labeled predicates of one type.
    ///
    /// For predicates of different types use the `validators! { .. => .. }`
    /// form or [`ValidatorSpec::with`].
    pub fn mapping<L, P, I>(entries: I) -> Self
    where
        L: Into<String>,
        P: Predicate<Value> + 'static,
        I: IntoIterator<Item = (L, P)>,
    {
        ValidatorSpec::Mapping(
            entries
                .into_iter()
                .map(|(label, p)| (label.into(), Arc::new(p) as SharedPredicate))
                .collect(),
        )
    }

    /// Add a labeled predicate to this spec.
    ///
    /// A mapping gains a new label; any other shape becomes a list ending
    /// with the labeled predicate.
    pub fn with<P: Predicate<Value> + 'static>(self, label: impl Into<String>, predicate: P) -> Self {
        match self {
            ValidatorSpec::Mapping(mut entries) => {
                entries.push((label.into(), Arc::new(predicate) as SharedPredicate));
                ValidatorSpec::Mapping(entries)
            }
            ValidatorSpec::None => {
                ValidatorSpec::Mapping(vec![(label.into(), Arc::new(predicate) as SharedPredicate)])
            }
            ValidatorSpec::List(mut items) => {
                items.push(ValidatorSpec::labeled(predicate, label));
                ValidatorSpec::List(items)
            }
            other => ValidatorSpec::List(vec![other, ValidatorSpec::labeled(predicate, label)]),
        }
    }

    /// Whether this spec normalizes to no entries.
    pub fn is_empty(&self) -> bool {
        match self {
            ValidatorSpec::None => true,
            ValidatorSpec::Single(_) | ValidatorSpec::Labeled(..) => false,
            ValidatorSpec::Mapping(entries) => entries.is_empty(),
            ValidatorSpec::List(items) => items.iter().all(ValidatorSpec::is_empty),
        }
    }
}

impl fmt::Debug for ValidatorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidatorSpec::None => f.write_str("None"),
            ValidatorSpec::Single(_) => f.write_str("Single(<predicate>)"),
            ValidatorSpec::Labeled(_, label) => f.debug_tuple("Labeled").field(label).finish(),
            ValidatorSpec::Mapping(entries) => f
                .debug_tuple("Mapping")
                .field(&entries.iter().map(|(l, _)| l).collect::<Vec<_>>())
                .finish(),
            ValidatorSpec::List(items) => f.debug_tuple("List").field(items).finish(),
        }
    }
}

/// Conversion into a [`ValidatorSpec`], used by the `validators!` macro and
/// by every API taking validators.
///
/// Implemented for predicates (unlabeled), `(predicate, label)` pairs,
/// vectors of specs and specs themselves.
pub trait IntoValidatorSpec {
    /// Perform the conversion.
    fn into_validator_spec(self) -> ValidatorSpec;
}

impl IntoValidatorSpec for ValidatorSpec {
    fn into_validator_spec(self) -> ValidatorSpec {
        self
    }
}

impl<P: Predicate<Value> + 'static> IntoValidatorSpec for P {
    fn into_validator_spec(self) -> ValidatorSpec {
        ValidatorSpec::single(self)
    }
}

impl<P: Predicate<Value> + 'static, L: Into<String>> IntoValidatorSpec for (P, L) {
    fn into_validator_spec(self) -> ValidatorSpec {
        ValidatorSpec::labeled(self.0, self.1)
    }
}

impl IntoValidatorSpec for Vec<ValidatorSpec> {
    fn into_validator_spec(self) -> ValidatorSpec {
        ValidatorSpec::List(self)
    }
}

impl IntoValidatorSpec for () {
    fn into_validator_spec(self) -> ValidatorSpec {
        ValidatorSpec::None
    }
}

/// Build a [`ValidatorSpec`].
///
/// * `validators![]` is the empty spec.
/// * `validators!["label" => pred, ...]` (or with braces) is a mapping.
/// * `validators![item, ...]` is a list; each item is anything implementing
///   [`IntoValidatorSpec`].
///
/// # Example
///
/// ```rust
/// use vtypes::predicate::*;
/// use vtypes::{validators, Value};
///
/// let spec = validators! { "should be non empty" => not_empty() };
/// assert!(!spec.is_empty());
///
/// let spec = validators![gt(0), (|v: &Value| v.as_i64() != Some(13), "unlucky")];
/// assert_eq!(vtypes::normalize(&spec).len(), 2);
/// ```
#[macro_export]
macro_rules! validators {
    () => {
        $crate::ValidatorSpec::None
    };
    ($($label:expr => $pred:expr),+ $(,)?) => {
        $crate::ValidatorSpec::Mapping(::std::vec![
            $((
                ::std::string::String::from($label),
                ::std::sync::Arc::new($pred) as $crate::SharedPredicate,
            )),+
        ])
    };
    ($($item:expr),+ $(,)?) => {
        $crate::ValidatorSpec::List(::std::vec![
            $($crate::IntoValidatorSpec::into_validator_spec($item)),+
        ])
    };
}

/// One normalized unit of validation.
#[derive(Clone)]
pub enum ValidatorEntry {
    /// A predicate with an optional failure label
    Single {
        /// The check
        predicate: SharedPredicate,
        /// Reported when the check fails
        label: Option<String>,
    },
    /// Labeled predicates; a failure names the labels that failed
    Group(Vec<(String, SharedPredicate)>),
}

impl ValidatorEntry {
    /// Labels of the predicates in this entry that reject `value`.
    ///
    /// An unlabeled failing predicate yields `None`; a passing entry yields
    /// an empty vector.
    pub fn failures(&self, value: &Value) -> Vec<Option<&str>> {
        match self {
            ValidatorEntry::Single { predicate, label } => {
                if predicate.check(value) {
                    Vec::new()
                } else {
                    vec![label.as_deref()]
                }
            }
            ValidatorEntry::Group(entries) => entries
                .iter()
                .filter(|(_, p)| !p.check(value))
                .map(|(label, _)| Some(label.as_str()))
                .collect(),
        }
    }

    /// Whether every predicate of this entry accepts `value`.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            ValidatorEntry::Single { predicate, .. } => predicate.check(value),
            ValidatorEntry::Group(entries) => entries.iter().all(|(_, p)| p.check(value)),
        }
    }

    /// The labels carried by this entry.
    pub fn labels(&self) -> Vec<&str> {
        match self {
            ValidatorEntry::Single { label, .. } => label.as_deref().into_iter().collect(),
            ValidatorEntry::Group(entries) => entries.iter().map(|(l, _)| l.as_str()).collect(),
        }
    }
}

impl fmt::Debug for ValidatorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidatorEntry::Single { label, .. } => {
                f.debug_struct("Single").field("label", label).finish()
            }
            ValidatorEntry::Group(_) => f.debug_tuple("Group").field(&self.labels()).finish(),
        }
    }
}

/// Flatten a spec into its ordered entries.
///
/// Empty specs, empty mappings and empty lists yield nothing. A mapping
/// becomes a single [`ValidatorEntry::Group`]; lists are flattened
/// recursively, in order.
///
/// # Example
///
/// ```rust
/// use vtypes::predicate::*;
/// use vtypes::{normalize, validators, ValidatorSpec};
///
/// assert!(normalize(&ValidatorSpec::None).is_empty());
/// assert!(normalize(&validators![]).is_empty());
///
/// let spec = validators![gt(0), validators![lt(10), gt(-10)]];
/// assert_eq!(normalize(&spec).len(), 3);
/// ```
pub fn normalize(spec: &ValidatorSpec) -> Vec<ValidatorEntry> {
    let mut out = Vec::new();
    normalize_into(spec, &mut out);
    out
}

fn normalize_into(spec: &ValidatorSpec, out: &mut Vec<ValidatorEntry>) {
    match spec {
        ValidatorSpec::None => {}
        ValidatorSpec::Single(p) => out.push(ValidatorEntry::Single {
            predicate: Arc::clone(p),
            label: None,
        }),
        ValidatorSpec::Labeled(p, label) => out.push(ValidatorEntry::Single {
            predicate: Arc::clone(p),
            label: Some(label.clone()),
        }),
        ValidatorSpec::Mapping(entries) => {
            if !entries.is_empty() {
                out.push(ValidatorEntry::Group(entries.clone()));
            }
        }
        ValidatorSpec::List(items) => {
            for item in items {
                normalize_into(item, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::{gt, lt, not_empty};

    fn label_sets(entries: &[ValidatorEntry]) -> Vec<Vec<&str>> {
        entries.iter().map(ValidatorEntry::labels).collect()
    }

    #[test]
    fn test_empty_shapes_normalize_to_nothing() {
        assert!(normalize(&ValidatorSpec::None).is_empty());
        assert!(normalize(&ValidatorSpec::List(vec![])).is_empty());
        assert!(normalize(&ValidatorSpec::Mapping(vec![])).is_empty());
        assert!(normalize(&().into_validator_spec()).is_empty());
        assert!(normalize(&validators![ValidatorSpec::None, validators![]]).is_empty());
    }

    #[test]
    fn test_single_and_labeled() {
        let entries = normalize(&ValidatorSpec::single(gt(0)));
        assert_eq!(entries.len(), 1);
        assert!(entries[0].labels().is_empty());

        let entries = normalize(&ValidatorSpec::labeled(gt(0), "positive"));
        assert_eq!(label_sets(&entries), vec![vec!["positive"]]);
    }

    #[test]
    fn test_mapping_is_one_group_in_insertion_order() {
        let spec = validators! {
            "z first" => gt(0),
            "a second" => lt(10),
        };
        let entries = normalize(&spec);
        assert_eq!(label_sets(&entries), vec![vec!["z first", "a second"]]);
    }

    #[test]
    fn test_pair_is_one_entry_list_of_two_is_two() {
        let pair = normalize(&(gt(0), "positive").into_validator_spec());
        assert_eq!(pair.len(), 1);

        let list = normalize(&validators![gt(0), lt(10)]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_nested_lists_flatten_in_order() {
        let spec = validators![
            (gt(0), "a"),
            validators![(lt(10), "b"), validators! { "c" => not_empty() }],
            (gt(-5), "d"),
        ];
        let entries = normalize(&spec);
        assert_eq!(
            label_sets(&entries),
            vec![vec!["a"], vec!["b"], vec!["c"], vec!["d"]]
        );
    }

    #[test]
    fn test_with_grows_mapping() {
        let spec = ValidatorSpec::None
            .with("positive", gt(0))
            .with("small", lt(10));
        assert!(matches!(spec, ValidatorSpec::Mapping(ref e) if e.len() == 2));

        let spec = ValidatorSpec::single(gt(0)).with("small", lt(10));
        assert_eq!(normalize(&spec).len(), 2);
    }

    #[test]
    fn test_group_reports_every_failing_label() {
        let entry = ValidatorEntry::Group(vec![
            ("positive".to_string(), Arc::new(gt(0)) as SharedPredicate),
            ("small".to_string(), Arc::new(lt(10)) as SharedPredicate),
            ("non empty".to_string(), Arc::new(not_empty()) as SharedPredicate),
        ]);
        assert_eq!(
            entry.failures(&Value::from(-1)),
            vec![Some("positive"), Some("non empty")]
        );
        assert!(!entry.accepts(&Value::from(-1)));
    }

    #[test]
    fn test_is_empty() {
        assert!(ValidatorSpec::None.is_empty());
        assert!(validators![validators![]].is_empty());
        assert!(!ValidatorSpec::single(gt(0)).is_empty());
    }
}
