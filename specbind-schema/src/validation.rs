//! Catalogue validation utilities.
//!
//! This module provides validation functions for struct catalogues to ensure
//! correctness and consistency before code generation.

use crate::catalogue::{CatalogueDef, DeclKind, StructDecl};
use crate::error::SchemaError;
use crate::manifest::ConstructorManifest;
use std::collections::HashSet;

/// Validates a parsed catalogue for correctness.
///
/// # Arguments
/// * `def` - The catalogue to validate
///
/// # Returns
/// Ok(()) if valid, or SchemaError describing the issue.
///
/// # Errors
/// Returns `SchemaError` if validation fails.
pub fn validate_catalogue(def: &CatalogueDef) -> Result<(), SchemaError> {
    validate_structs(def)?;
    if let Some(manifest) = &def.constructors {
        validate_manifest(def, manifest)?;
    }
    Ok(())
}

/// Validates all struct declarations in the catalogue.
fn validate_structs(def: &CatalogueDef) -> Result<(), SchemaError> {
    let mut seen_names = HashSet::new();

    for decl in &def.structs {
        if !seen_names.insert(&decl.name) {
            return Err(SchemaError::Validation {
                message: format!("Duplicate struct name '{}'", decl.name),
            });
        }
        validate_struct_fields(decl)?;
    }

    Ok(())
}

/// Validates the fields within a struct.
fn validate_struct_fields(decl: &StructDecl) -> Result<(), SchemaError> {
    let mut seen_fields = HashSet::new();

    for field in &decl.fields {
        if !seen_fields.insert(&field.name) {
            return Err(SchemaError::DuplicateField {
                owner: decl.name.clone(),
                field: field.name.clone(),
            });
        }

        if field.kind == DeclKind::Array
            && (field.extents.is_empty() || field.extents.contains(&0))
        {
            return Err(SchemaError::EmptyExtent {
                owner: decl.name.clone(),
                field: field.name.clone(),
            });
        }
    }

    Ok(())
}

/// Validates a constructor manifest against the catalogue.
///
/// # Errors
/// Returns `SchemaError` if an entry names an unknown struct or appears twice.
pub fn validate_manifest(
    def: &CatalogueDef,
    manifest: &ConstructorManifest,
) -> Result<(), SchemaError> {
    let mut seen_names = HashSet::new();

    for entry in manifest.iter() {
        if !def.has_struct(&entry.name) {
            return Err(SchemaError::StructNotFound {
                name: entry.name.clone(),
            });
        }

        if !seen_names.insert(&entry.name) {
            return Err(SchemaError::Validation {
                message: format!("Duplicate constructor for struct '{}'", entry.name),
            });
        }
    }

    Ok(())
}
