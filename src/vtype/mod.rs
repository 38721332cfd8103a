//! Validating types
//!
//! A [`VType`] fuses structural type checks with value validators. A value
//! is an instance of a `VType` only if it is an instance of every one of the
//! type's *effective types* and passes its *effective validators*.
//!
//! Types are declared once, through [`VTypeDecl`] or the [`vtype`] factory,
//! and composed eagerly: inherited types and validators are flattened into
//! the new descriptor, so checks never walk the ancestry again.
//!
//! # Example
//!
//! ```rust
//! use vtypes::predicate::*;
//! use vtypes::{validators, vtype, Kind, VType, Value};
//!
//! let non_empty = VType::declare("NonEmpty")
//!     .validators(validators! { "should be non empty" => not_empty() })
//!     .build()
//!     .unwrap();
//!
//! // A subtype that also has to be a string
//! let non_empty_str = non_empty.derive("NonEmptyStr").parent(Kind::Str).build().unwrap();
//!
//! assert!(non_empty_str.is_instance(&Value::from("hoho")));
//! assert!(!non_empty_str.is_instance(&Value::from("")));
//! assert!(!non_empty_str.is_instance(&Value::from(1)));
//!
//! assert!(non_empty_str.is_subtype_of(&non_empty));
//! assert!(non_empty_str.is_subtype_of(Kind::Str));
//! assert!(!non_empty.is_subtype_of(&non_empty_str));
//! ```

mod compose;
mod decl;

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::panic::Location;
use std::sync::{Arc, LazyLock};

use crate::error::{ErrorKind, FailedCheck, Failure, InstantiationError, ValidationError};
use crate::validator::Validator;
use crate::validators::{IntoValidatorSpec, ValidatorEntry};
use crate::{Kind, Value};

pub use decl::{VTypeDecl, ALLOWED_ATTRIBUTES};

pub(crate) use compose::compose;

/// One structural type: a plain [`Kind`] or a nested [`VType`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// A plain structural type
    Kind(Kind),
    /// A validating type, checked with full (structural and value) semantics
    VType(VType),
}

impl TypeRef {
    /// Whether this is a validating type.
    pub fn is_vtype(&self) -> bool {
        matches!(self, TypeRef::VType(_))
    }

    /// Full instance check. Nested validating types enforce their validators.
    pub fn is_instance(&self, value: &Value) -> bool {
        match self {
            TypeRef::Kind(kind) => kind.accepts(value),
            TypeRef::VType(vt) => vt.is_instance(value),
        }
    }

    /// Structural-only check.
    pub fn has_valid_type(&self, value: &Value) -> bool {
        match self {
            TypeRef::Kind(kind) => kind.accepts(value),
            TypeRef::VType(vt) => vt.has_valid_type(value),
        }
    }

    /// Whether `self` is `sup` or a descendant of it.
    ///
    /// Every type is a subtype of [`Kind::Any`] and of the root marker
    /// [`VType::root`]. A plain kind is never a subtype of any other
    /// validating type.
    pub fn is_subtype_of(&self, sup: &TypeRef) -> bool {
        match (self, sup) {
            (_, TypeRef::Kind(Kind::Any)) => true,
            (_, TypeRef::VType(s)) if s.is_root() => true,
            (TypeRef::Kind(a), TypeRef::Kind(b)) => a.is_subkind_of(*b),
            (TypeRef::Kind(_), TypeRef::VType(_)) => false,
            (TypeRef::VType(a), _) => a.subtype_of(sup),
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        match self {
            TypeRef::Kind(kind) => kind.name(),
            TypeRef::VType(vt) => vt.name(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Kind> for TypeRef {
    fn from(kind: Kind) -> Self {
        TypeRef::Kind(kind)
    }
}

impl From<VType> for TypeRef {
    fn from(vt: VType) -> Self {
        TypeRef::VType(vt)
    }
}

impl From<&VType> for TypeRef {
    fn from(vt: &VType) -> Self {
        TypeRef::VType(vt.clone())
    }
}

/// Conversion into a list of structural types.
///
/// Implemented for single types, tuples of up to four types (mirroring
/// `types = NonEmpty, str` style declarations), vectors and arrays.
pub trait IntoTypes {
    /// Perform the conversion.
    fn into_types(self) -> Vec<TypeRef>;
}

impl IntoTypes for () {
    fn into_types(self) -> Vec<TypeRef> {
        Vec::new()
    }
}

impl IntoTypes for Kind {
    fn into_types(self) -> Vec<TypeRef> {
        vec![TypeRef::Kind(self)]
    }
}

impl IntoTypes for VType {
    fn into_types(self) -> Vec<TypeRef> {
        vec![TypeRef::VType(self)]
    }
}

impl IntoTypes for &VType {
    fn into_types(self) -> Vec<TypeRef> {
        vec![TypeRef::VType(self.clone())]
    }
}

impl IntoTypes for TypeRef {
    fn into_types(self) -> Vec<TypeRef> {
        vec![self]
    }
}

impl<T: Into<TypeRef>> IntoTypes for Vec<T> {
    fn into_types(self) -> Vec<TypeRef> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T: Into<TypeRef>, const N: usize> IntoTypes for [T; N] {
    fn into_types(self) -> Vec<TypeRef> {
        self.into_iter().map(Into::into).collect()
    }
}

macro_rules! impl_into_types_for_tuple {
    ($($t:ident),+) => {
        impl<$($t: Into<TypeRef>),+> IntoTypes for ($($t,)+) {
            #[allow(non_snake_case)]
            fn into_types(self) -> Vec<TypeRef> {
                let ($($t,)+) = self;
                vec![$($t.into()),+]
            }
        }
    };
}

impl_into_types_for_tuple!(A, B);
impl_into_types_for_tuple!(A, B, C);
impl_into_types_for_tuple!(A, B, C, D);

pub(crate) struct Inner {
    pub(crate) decl: VTypeDecl,
    pub(crate) root: bool,
    pub(crate) effective_types: Vec<TypeRef>,
    pub(crate) effective_validators: Vec<ValidatorEntry>,
    pub(crate) own_validator_count: usize,
    pub(crate) validator: Option<Validator>,
    pub(crate) own_validator: Option<Validator>,
}

/// A validating type.
///
/// Cheap to clone: clones share one immutable descriptor, and equality is
/// identity of that descriptor.
#[derive(Clone)]
pub struct VType(pub(crate) Arc<Inner>);

static ROOT: LazyLock<VType> = LazyLock::new(|| {
    let decl = VTypeDecl::new("VType").doc("The root of all validating types.");
    VType(Arc::new(Inner {
        decl,
        root: true,
        effective_types: Vec::new(),
        effective_validators: Vec::new(),
        own_validator_count: 0,
        validator: None,
        own_validator: None,
    }))
});

impl VType {
    /// The root marker type every validating type descends from.
    ///
    /// It has no structural types and no validators, so every value is an
    /// instance of it.
    pub fn root() -> VType {
        ROOT.clone()
    }

    /// Start declaring a type whose only parent is the root marker.
    #[track_caller]
    pub fn declare(name: impl Into<String>) -> VTypeDecl {
        VTypeDecl::new(name).parent(VType::root())
    }

    /// Start declaring a subtype of this type.
    ///
    /// Add further parents (validating or plain) with
    /// [`VTypeDecl::parent`].
    #[track_caller]
    pub fn derive(&self, name: impl Into<String>) -> VTypeDecl {
        VTypeDecl::new(name).parent(self)
    }

    /// Whether this is the root marker type.
    pub fn is_root(&self) -> bool {
        self.0.root
    }

    /// The type's name.
    pub fn name(&self) -> &str {
        &self.0.decl.name
    }

    /// Documentation given at declaration.
    pub fn doc(&self) -> Option<&str> {
        self.0.decl.doc.as_deref()
    }

    /// Where the type was declared.
    pub fn origin(&self) -> Option<&'static Location<'static>> {
        self.0.decl.origin
    }

    /// A metadata attribute (`module`, `qualname`) given at declaration.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.0.decl.attrs.get(key).map(String::as_str)
    }

    /// All metadata attributes.
    pub fn attrs(&self) -> &BTreeMap<String, String> {
        &self.0.decl.attrs
    }

    /// Help message attached to every failure raised through this type.
    pub fn help_msg(&self) -> Option<&str> {
        self.0.decl.help_msg.as_deref()
    }

    /// Error kind attached to every failure raised through this type.
    pub fn error_kind(&self) -> Option<&ErrorKind> {
        self.0.decl.error_kind.as_ref()
    }

    /// Declared parents, root marker included.
    pub fn parents(&self) -> &[TypeRef] {
        &self.0.decl.parents
    }

    /// Own declared structural types.
    pub fn declared_types(&self) -> &[TypeRef] {
        &self.0.decl.types
    }

    /// Flattened structural types a value must be an instance of.
    pub fn effective_types(&self) -> &[TypeRef] {
        &self.0.effective_types
    }

    /// The effective types, seen as bases when this type is derived from.
    pub fn bases(&self) -> &[TypeRef] {
        self.effective_types()
    }

    /// Flattened validators: own first, then inherited, parent by parent.
    pub fn effective_validators(&self) -> &[ValidatorEntry] {
        &self.0.effective_validators
    }

    /// Validators declared on this type itself.
    pub fn own_validators(&self) -> &[ValidatorEntry] {
        &self.0.effective_validators[..self.0.own_validator_count]
    }

    /// Compiled validator over the effective validators, if there are any.
    pub fn validator(&self) -> Option<&Validator> {
        self.0.validator.as_ref()
    }

    /// `true` iff `value` is an instance of every effective type and passes
    /// the effective validators.
    ///
    /// Nested validating types are checked in full. Validators only run once
    /// the structural check passed.
    pub fn is_instance(&self, value: &Value) -> bool {
        self.0.effective_types.iter().all(|t| t.is_instance(value))
            && self.0.validator.as_ref().is_none_or(|v| v.is_valid(value))
    }

    /// Structural-only check: nested validating types contribute their own
    /// structural check, never their validators.
    pub fn has_valid_type(&self, value: &Value) -> bool {
        self.0.effective_types.iter().all(|t| t.has_valid_type(value))
    }

    /// Value-only check.
    ///
    /// With `inherited`, the effective validators and the value checks of
    /// every validating type among the effective types must pass. Without
    /// it, only the validators declared on this type are consulted.
    pub fn has_valid_value(&self, value: &Value, inherited: bool) -> bool {
        if !inherited {
            return self
                .0
                .own_validator
                .as_ref()
                .is_none_or(|v| v.is_valid(value));
        }
        self.0.validator.as_ref().is_none_or(|v| v.is_valid(value))
            && self
                .nested_vtypes()
                .all(|nested| nested.has_valid_value(value, true))
    }

    /// Number of checks `assert_valid` numbers, nested types included.
    fn check_count(&self) -> usize {
        self.0.effective_validators.len()
            + self
                .nested_vtypes()
                .map(VType::check_count)
                .sum::<usize>()
    }

    fn nested_vtypes(&self) -> impl Iterator<Item = &VType> {
        self.0.effective_types.iter().filter_map(|t| match t {
            TypeRef::VType(nested) => Some(nested),
            TypeRef::Kind(_) => None,
        })
    }

    /// Failing checks numbered from `offset`: this type's entries first, then
    /// each nested type's, so indices never collide.
    fn value_failures(&self, value: &Value, offset: usize) -> Vec<FailedCheck> {
        let mut failed: Vec<FailedCheck> = self
            .0
            .validator
            .as_ref()
            .map(|v| v.failures(value))
            .unwrap_or_default()
            .into_iter()
            .map(|check| FailedCheck {
                index: check.index + offset,
                ..check
            })
            .collect();
        let mut next = offset + self.0.effective_validators.len();
        for nested in self.nested_vtypes() {
            failed.extend(nested.value_failures(value, next));
            next += nested.check_count();
        }
        failed
    }

    /// Validate `value`, reported under `name`.
    ///
    /// The structural check runs first and fails with [`Failure::Type`];
    /// then the value check, failing with [`Failure::Value`] listing every
    /// rejected check. Both carry this type's help message and error kind.
    pub fn assert_valid(&self, name: &str, value: &Value) -> Result<(), ValidationError> {
        if !self.has_valid_type(value) {
            #[cfg(feature = "tracing")]
            tracing::trace!(vtype = self.name(), name, "value has the wrong type");

            let expected = self
                .0
                .effective_types
                .iter()
                .map(|t| t.name().to_string())
                .collect();
            return Err(self.error(name, value, Failure::Type { expected }));
        }

        let failed = self.value_failures(value, 0);
        if failed.is_empty() {
            return Ok(());
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(vtype = self.name(), name, failed = failed.len(), "value rejected");

        Err(self.error(name, value, Failure::Value { failed }))
    }

    /// Alias of [`VType::assert_valid`].
    #[inline]
    pub fn validate(&self, name: &str, value: &Value) -> Result<(), ValidationError> {
        self.assert_valid(name, value)
    }

    fn error(&self, name: &str, value: &Value, failure: Failure) -> ValidationError {
        ValidationError::new(name, value.clone(), failure)
            .with_help_msg(self.0.decl.help_msg.clone())
            .with_error_kind(self.0.decl.error_kind.clone())
    }

    /// Whether this type is `sup` or descends from it.
    ///
    /// A validating type is a subtype of each of its parents and of every
    /// type in its effective types, transitively. Asking in the wrong
    /// direction answers `false`.
    pub fn is_subtype_of(&self, sup: impl Into<TypeRef>) -> bool {
        self.subtype_of(&sup.into())
    }

    pub(crate) fn subtype_of(&self, sup: &TypeRef) -> bool {
        match sup {
            TypeRef::VType(s) if s == self || s.is_root() => return true,
            TypeRef::Kind(Kind::Any) => return true,
            _ => {}
        }
        self.parents()
            .iter()
            .chain(self.effective_types())
            .any(|t| t.is_subtype_of(sup))
    }

    /// Rebuild this type with different own validators.
    ///
    /// Composition runs again over the original declaration; `self` is left
    /// untouched.
    pub fn with_validators(
        &self,
        validators: impl IntoValidatorSpec,
    ) -> Result<VType, crate::DeclarationError> {
        let mut decl = self.0.decl.clone();
        decl.validators = validators.into_validator_spec();
        compose(decl)
    }

    /// Validating types describe values and are never values themselves.
    ///
    /// Always fails.
    pub fn instantiate(&self) -> Result<Value, InstantiationError> {
        Err(InstantiationError {
            name: self.name().to_string(),
        })
    }
}

impl PartialEq for VType {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for VType {}

impl Hash for VType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.0), state);
    }
}

impl fmt::Debug for VType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VType")
            .field("name", &self.name())
            .field(
                "effective_types",
                &self.effective_types().iter().map(TypeRef::name).collect::<Vec<_>>(),
            )
            .field("effective_validators", &self.effective_validators())
            .finish()
    }
}

impl fmt::Display for VType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declare a validating type whose only parent is the root marker.
///
/// `base` are the structural types, `validators` any validator spec. Use
/// [`VType::declare`] to also set a help message, error kind or doc.
///
/// # Example
///
/// ```rust
/// use vtypes::predicate::*;
/// use vtypes::{validators, vtype, Kind, Value};
///
/// let positive_int = vtype(
///     "PositiveInt",
///     Kind::Int,
///     validators! { "should be positive" => non_negative() },
/// )
/// .unwrap();
///
/// assert!(positive_int.is_instance(&Value::from(1)));
/// assert!(!positive_int.is_instance(&Value::from(-1)));
/// assert!(!positive_int.is_instance(&Value::from("1")));
/// assert!(positive_int.has_valid_type(&Value::from(-1)));
/// assert!(!positive_int.has_valid_value(&Value::from(-1), true));
/// assert!(positive_int.validate("x", &Value::from(-1)).is_err());
/// ```
#[track_caller]
pub fn vtype(
    name: impl Into<String>,
    base: impl IntoTypes,
    validators: impl IntoValidatorSpec,
) -> Result<VType, crate::DeclarationError> {
    VType::declare(name).types(base).validators(validators).build()
}

/// Whether `sub` is `sup` or descends from it.
pub fn is_subtype(sub: impl Into<TypeRef>, sup: impl Into<TypeRef>) -> bool {
    sub.into().is_subtype_of(&sup.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::{gt, lt, non_negative, not_empty};
    use crate::{validators, DeclarationError};

    fn positive_int() -> VType {
        vtype(
            "PositiveInt",
            Kind::Int,
            validators! { "should be positive" => non_negative() },
        )
        .unwrap()
    }

    fn non_empty() -> VType {
        VType::declare("NonEmpty")
            .validators(validators! { "should be non empty" => not_empty() })
            .build()
            .unwrap()
    }

    #[test]
    fn test_positive_int() {
        let t = positive_int();
        assert!(t.is_instance(&Value::from(1)));
        assert!(!t.is_instance(&Value::from(-1)));
        assert!(!t.is_instance(&Value::from("1")));
        assert!(t.has_valid_type(&Value::from(-1)));
        assert!(!t.has_valid_value(&Value::from(-1), true));
        assert_eq!(t.effective_types(), &[TypeRef::Kind(Kind::Int)]);
    }

    #[test]
    fn test_non_empty_without_types_accepts_any_sized() {
        let t = non_empty();
        assert!(t.effective_types().is_empty());
        assert!(t.is_instance(&Value::from("hoho")));
        assert!(!t.is_instance(&Value::from("")));
        assert!(!t.is_instance(&Value::from(Vec::<i32>::new())));
        assert!(t.is_instance(&Value::from(vec![1])));
        assert!(!t.is_instance(&Value::from(1)));
    }

    #[test]
    fn test_inherited_value_check() {
        let t = non_empty().derive("NonEmptyStr").parent(Kind::Str).build().unwrap();
        assert!(t.has_valid_value(&Value::from(""), false));
        assert!(!t.has_valid_value(&Value::from(""), true));
        assert!(t.own_validators().is_empty());
        assert_eq!(t.effective_validators().len(), 1);
    }

    #[test]
    fn test_nested_vtype_in_types_enforces_its_validators() {
        let alt = VType::declare("AlternateNonEmptyStr")
            .types((non_empty(), Kind::Str))
            .build()
            .unwrap();
        assert!(alt.effective_validators().is_empty());
        assert!(alt.is_instance(&Value::from("hoho")));
        assert!(!alt.is_instance(&Value::from("")));
        assert!(!alt.is_instance(&Value::from(1)));

        assert!(alt.has_valid_type(&Value::from("")));
        assert!(!alt.has_valid_value(&Value::from(""), true));
        assert!(alt.has_valid_value(&Value::from(""), false));
    }

    #[test]
    fn test_assert_valid_reports_type_then_value() {
        let t = VType::declare("Small")
            .types(Kind::Int)
            .validators(validators![(gt(0), "positive"), (lt(10), "small")])
            .help_msg("a small positive int")
            .error_kind("InvalidSmall")
            .build()
            .unwrap();

        let err = t.assert_valid("n", &Value::from("3")).unwrap_err();
        assert!(err.is_type_failure());
        assert_eq!(
            err.failure(),
            &Failure::Type {
                expected: vec!["int".to_string()]
            }
        );
        assert_eq!(err.help_msg(), Some("a small positive int"));

        let err = t.assert_valid("n", &Value::from(30)).unwrap_err();
        assert!(err.is_value_failure());
        assert_eq!(err.failed_labels(), vec!["small"]);
        assert_eq!(err.error_kind().map(ErrorKind::as_str), Some("InvalidSmall"));

        assert!(t.validate("n", &Value::from(3)).is_ok());
    }

    #[test]
    fn test_assert_valid_collects_nested_failures() {
        let alt = VType::declare("Alt")
            .types((non_empty(), Kind::Str))
            .validators((|v: &Value| v.as_str() != Some(""), "not blank"))
            .build()
            .unwrap();
        let err = alt.assert_valid("s", &Value::from("")).unwrap_err();
        assert_eq!(err.failed_labels(), vec!["not blank", "should be non empty"]);
    }

    #[test]
    fn test_nested_unlabeled_failures_are_numbered_after_outer_checks() {
        let positive = vtype("Positive", (), validators![gt(0)]).unwrap();
        let even = vtype(
            "Even",
            (),
            validators![|v: &Value| v.as_i64().is_some_and(|i| i % 2 == 0)],
        )
        .unwrap();
        let t = VType::declare("SmallEvenPositive")
            .types((Kind::Int, &positive, &even))
            .validators(validators![lt(10), lt(100)])
            .build()
            .unwrap();

        let err = t.assert_valid("n", &Value::from(-101)).unwrap_err();
        let indices: Vec<usize> = match err.failure() {
            Failure::Value { failed } => failed.iter().map(|c| c.index).collect(),
            other => panic!("expected a value failure, got {:?}", other),
        };
        assert_eq!(indices, vec![2, 3]);
        assert!(err.to_string().contains("validator #2, validator #3"), "{}", err);

        let err = t.assert_valid("n", &Value::from(150)).unwrap_err();
        assert!(err.to_string().contains("validator #0, validator #1"), "{}", err);
    }

    #[test]
    fn test_root_accepts_everything() {
        let root = VType::root();
        assert!(root.is_root());
        assert!(root.is_instance(&Value::Null));
        assert!(root.has_valid_value(&Value::from(1), true));
        assert_eq!(root, VType::root());
    }

    #[test]
    fn test_subtyping() {
        let ne = non_empty();
        let nes = ne.derive("NonEmptyStr").parent(Kind::Str).build().unwrap();
        let short = nes
            .derive("ShortStr")
            .validators((|v: &Value| v.len().is_some_and(|n| n < 5), "short"))
            .build()
            .unwrap();

        assert!(short.is_subtype_of(&short));
        assert!(short.is_subtype_of(&nes));
        assert!(short.is_subtype_of(&ne));
        assert!(short.is_subtype_of(Kind::Str));
        assert!(short.is_subtype_of(Kind::Sized));
        assert!(short.is_subtype_of(VType::root()));

        assert!(!ne.is_subtype_of(&nes));
        assert!(!nes.is_subtype_of(&short));
        assert!(!short.is_subtype_of(Kind::Int));
        assert!(!is_subtype(Kind::Str, &nes));
        assert!(is_subtype(Kind::Str, VType::root()));
    }

    #[test]
    fn test_with_validators_returns_new_type() {
        let t = positive_int();
        let strict = t.with_validators((gt(100), "big")).unwrap();

        assert_ne!(t, strict);
        assert_eq!(strict.name(), "PositiveInt");
        assert!(t.is_instance(&Value::from(5)));
        assert!(!strict.is_instance(&Value::from(5)));
        assert!(strict.is_instance(&Value::from(500)));
    }

    #[test]
    fn test_instantiate_fails() {
        let err = positive_int().instantiate().unwrap_err();
        assert_eq!(err.name, "PositiveInt");
    }

    #[test]
    fn test_factory_records_origin() {
        let t = positive_int();
        let origin = t.origin().expect("origin recorded");
        assert!(origin.file().ends_with("mod.rs"));
    }

    #[test]
    fn test_declaration_without_validating_parent_fails() {
        let err = VTypeDecl::new("Bad").parent(Kind::Str).build().unwrap_err();
        assert_eq!(
            err,
            DeclarationError::NoValidatingAncestor {
                name: "Bad".to_string()
            }
        );
    }
}
