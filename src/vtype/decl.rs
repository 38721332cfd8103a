//! Declarations of validating types

use std::collections::BTreeMap;
use std::panic::Location;

use super::{compose, IntoTypes, TypeRef, VType};
use crate::error::{DeclarationError, ErrorKind};
use crate::validators::{IntoValidatorSpec, ValidatorSpec};

/// Attribute names accepted by [`VTypeDecl::attr`].
pub const ALLOWED_ATTRIBUTES: &[&str] = &["doc", "help_msg", "error_kind", "module", "qualname"];

/// The declaration of a validating type, composed by [`VTypeDecl::build`].
///
/// Parents play the role of base classes: validating parents contribute
/// their effective types and validators, plain kinds are added to the
/// structural types. At least one parent must be a validating type, which
/// for a fresh type is the root marker ([`VType::declare`] adds it).
///
/// # Example
///
/// ```rust
/// use vtypes::predicate::*;
/// use vtypes::{Kind, VType, Value};
///
/// let port = VType::declare("Port")
///     .types(Kind::Int)
///     .validators((between(1, 65535), "should be a valid port number"))
///     .help_msg("ports are integers in 1..=65535")
///     .error_kind("InvalidPort")
///     .doc("A TCP or UDP port.")
///     .build()
///     .unwrap();
///
/// assert!(port.is_instance(&Value::from(8080)));
/// assert_eq!(port.doc(), Some("A TCP or UDP port."));
/// ```
#[derive(Debug, Clone)]
pub struct VTypeDecl {
    pub(crate) name: String,
    pub(crate) parents: Vec<TypeRef>,
    pub(crate) types: Vec<TypeRef>,
    pub(crate) validators: ValidatorSpec,
    pub(crate) help_msg: Option<String>,
    pub(crate) error_kind: Option<ErrorKind>,
    pub(crate) doc: Option<String>,
    pub(crate) attrs: BTreeMap<String, String>,
    pub(crate) origin: Option<&'static Location<'static>>,
}

impl VTypeDecl {
    /// Start a declaration with no parents.
    ///
    /// Records the caller's location as the type's origin.
    #[track_caller]
    pub fn new(name: impl Into<String>) -> Self {
        VTypeDecl {
            name: name.into(),
            parents: Vec::new(),
            types: Vec::new(),
            validators: ValidatorSpec::None,
            help_msg: None,
            error_kind: None,
            doc: None,
            attrs: BTreeMap::new(),
            origin: Some(Location::caller()),
        }
    }

    /// Add a parent type.
    pub fn parent(mut self, parent: impl Into<TypeRef>) -> Self {
        self.parents.push(parent.into());
        self
    }

    /// Add several parent types, in order.
    pub fn parents(mut self, parents: impl IntoTypes) -> Self {
        self.parents.extend(parents.into_types());
        self
    }

    /// Add own structural types.
    pub fn types(mut self, types: impl IntoTypes) -> Self {
        self.types.extend(types.into_types());
        self
    }

    /// Set own validators, replacing any set before.
    pub fn validators(mut self, validators: impl IntoValidatorSpec) -> Self {
        self.validators = validators.into_validator_spec();
        self
    }

    /// Set the help message.
    pub fn help_msg(mut self, help_msg: impl Into<String>) -> Self {
        self.help_msg = Some(help_msg.into());
        self
    }

    /// Set the error kind.
    pub fn error_kind(mut self, error_kind: impl Into<ErrorKind>) -> Self {
        self.error_kind = Some(error_kind.into());
        self
    }

    /// Set the documentation.
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Set a named attribute.
    ///
    /// `doc`, `help_msg` and `error_kind` behave like their dedicated
    /// methods; `module` and `qualname` are kept as metadata. Structural
    /// types and validators are typed and only set through
    /// [`types`](Self::types) and [`validators`](Self::validators). Any other
    /// name, `types` and `validators` included, makes
    /// [`build`](Self::build) fail with [`DeclarationError::ExtraAttributes`].
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match key.as_str() {
            "doc" => self.doc = Some(value),
            "help_msg" => self.help_msg = Some(value),
            "error_kind" => self.error_kind = Some(ErrorKind::new(value)),
            _ => {
                self.attrs.insert(key, value);
            }
        }
        self
    }

    /// The declared name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Compose the declared type.
    pub fn build(self) -> Result<VType, DeclarationError> {
        compose(self)
    }
}
