//! Composition of declared types
//!
//! Runs once per declaration: checks the declaration is well formed, then
//! flattens the parents' effective types and validators into the new type
//! and compiles its validators.

use std::sync::Arc;

use super::decl::ALLOWED_ATTRIBUTES;
use super::{Inner, TypeRef, VType, VTypeDecl};
use crate::error::DeclarationError;
use crate::validator::Validator;
use crate::validators::{normalize, ValidatorEntry};

/// Compose a declaration into a validating type.
///
/// - Effective types: own declared types, then for each parent in order its
///   effective types (validating parent) or itself (plain kind).
/// - Effective validators: own normalized validators, then each validating
///   parent's effective validators, left to right.
///
/// The root marker is skipped in both, since it contributes nothing.
pub(crate) fn compose(decl: VTypeDecl) -> Result<VType, DeclarationError> {
    check_attributes(&decl)?;
    check_ancestry(&decl)?;

    let mut effective_types = decl.types.clone();
    let mut effective_validators = normalize(&decl.validators);
    let own_validator_count = effective_validators.len();

    for parent in &decl.parents {
        match parent {
            TypeRef::VType(vt) if vt.is_root() => {}
            TypeRef::VType(vt) => {
                effective_types.extend_from_slice(vt.effective_types());
                effective_validators.extend_from_slice(vt.effective_validators());
            }
            TypeRef::Kind(_) => effective_types.push(parent.clone()),
        }
    }

    let validator = compile(&decl, &effective_validators);
    let own_validator = compile(&decl, &effective_validators[..own_validator_count]);

    #[cfg(feature = "tracing")]
    tracing::debug!(
        vtype = %decl.name,
        types = effective_types.len(),
        validators = effective_validators.len(),
        own_validators = own_validator_count,
        "composed validating type"
    );

    Ok(VType(Arc::new(Inner {
        decl,
        root: false,
        effective_types,
        effective_validators,
        own_validator_count,
        validator,
        own_validator,
    })))
}

fn compile(decl: &VTypeDecl, entries: &[ValidatorEntry]) -> Option<Validator> {
    if entries.is_empty() {
        return None;
    }
    Some(
        Validator::new(entries.to_vec())
            .with_options(decl.help_msg.clone(), decl.error_kind.clone()),
    )
}

fn check_attributes(decl: &VTypeDecl) -> Result<(), DeclarationError> {
    let extra: Vec<String> = decl
        .attrs
        .keys()
        .filter(|k| !ALLOWED_ATTRIBUTES.contains(&k.as_str()))
        .cloned()
        .collect();
    if extra.is_empty() {
        return Ok(());
    }

    #[cfg(feature = "tracing")]
    tracing::warn!(vtype = %decl.name, attrs = ?extra, "extra attributes on validating type");

    Err(DeclarationError::ExtraAttributes {
        name: decl.name.clone(),
        attrs: extra,
    })
}

fn check_ancestry(decl: &VTypeDecl) -> Result<(), DeclarationError> {
    if decl.parents.iter().any(TypeRef::is_vtype) {
        return Ok(());
    }

    #[cfg(feature = "tracing")]
    tracing::warn!(vtype = %decl.name, "validating type declared without validating ancestor");

    Err(DeclarationError::NoValidatingAncestor {
        name: decl.name.clone(),
    })
}
