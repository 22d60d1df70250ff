//! Intermediate representation for code generation.
//!
//! This module provides the resolved catalogue: every field type name is
//! mapped onto a [`FieldType`] variant, so code generation can dispatch on
//! shape alone.

use crate::catalogue::{CatalogueDef, DeclKind, FieldDef, StructDecl};
use crate::types::{
    FieldType, PointerTarget, STRING_TYPE, ScalarType, Scope, StructRef, ValueType, VectorKind,
};
use std::collections::HashMap;

/// Resolved catalogue, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    /// Naming conventions for the bound structs.
    pub scope: Scope,
    /// Resolved structs in declaration order.
    pub structs: Vec<StructDef>,
    index: HashMap<String, usize>,
}

impl Catalogue {
    /// Creates an empty catalogue.
    #[must_use]
    pub fn new(scope: Scope) -> Self {
        Self {
            scope,
            structs: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Resolves a parsed catalogue definition.
    #[must_use]
    pub fn from_def(def: &CatalogueDef) -> Self {
        let mut catalogue = Self::new(def.scope.clone());
        for decl in &def.structs {
            catalogue.add_struct(StructDef::from_decl(decl, def));
        }
        catalogue
    }

    /// Appends a resolved struct.
    pub fn add_struct(&mut self, def: StructDef) {
        self.index.insert(def.name.clone(), self.structs.len());
        self.structs.push(def);
    }

    /// Gets a resolved struct by name.
    #[must_use]
    pub fn get_struct(&self, name: &str) -> Option<&StructDef> {
        self.index.get(name).map(|&idx| &self.structs[idx])
    }

    /// Iterates the structs that receive property bindings, in order.
    pub fn bound_structs(&self) -> impl Iterator<Item = &StructDef> {
        self.structs
            .iter()
            .filter(|s| self.scope.in_scope(&s.name))
    }
}

/// How the scripting object reaches its native struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Holder {
    /// The object is the raw struct itself.
    #[default]
    Raw,
    /// The object wraps a pointer to the struct.
    Wrapped,
}

/// Resolved struct.
#[derive(Debug, Clone)]
pub struct StructDef {
    /// Struct name.
    pub name: String,
    /// How bindings reach the struct.
    pub holder: Holder,
    /// Resolved fields in declaration order.
    pub fields: Vec<FieldDecl>,
}

impl StructDef {
    /// Creates an empty struct reached directly.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            holder: Holder::Raw,
            fields: Vec::new(),
        }
    }

    /// Builder-style field append.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, ty: FieldType) -> Self {
        self.fields.push(FieldDecl {
            name: name.into(),
            ty,
        });
        self
    }

    /// Resolves a struct declaration against its catalogue.
    #[must_use]
    pub fn from_decl(decl: &StructDecl, def: &CatalogueDef) -> Self {
        let holder = if decl.name == def.scope.root {
            Holder::Wrapped
        } else {
            Holder::Raw
        };
        let fields = decl
            .fields
            .iter()
            .map(|f| FieldDecl {
                name: f.name.clone(),
                ty: resolve_field(f, def),
            })
            .collect();

        Self {
            name: decl.name.clone(),
            holder,
            fields,
        }
    }
}

/// Resolved field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    /// Field name.
    pub name: String,
    /// Resolved type.
    pub ty: FieldType,
}

impl FieldDecl {
    /// Creates a resolved field.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Resolves a declared field into its shape.
fn resolve_field(field: &FieldDef, def: &CatalogueDef) -> FieldType {
    match field.kind {
        DeclKind::Value => FieldType::Value(resolve_value(&field.type_name, def)),
        DeclKind::Pointer => FieldType::Pointer(resolve_pointer(&field.type_name, def)),
        DeclKind::Array => FieldType::Array {
            element: resolve_value(&field.type_name, def),
            extents: field.extents.clone(),
        },
    }
}

fn resolve_value(name: &str, def: &CatalogueDef) -> ValueType {
    if let Some(scalar) = ScalarType::from_native_name(name) {
        return ValueType::Scalar(scalar);
    }
    if name == "char" {
        return ValueType::Char;
    }
    // Only element structs have raw bindings; other catalogue structs are
    // reached like any native type.
    match def.get_struct(name) {
        Some(decl) if name.starts_with(def.scope.prefix.as_str()) => {
            ValueType::Struct(StructRef {
                name: decl.name.clone(),
                inline: decl.inline,
            })
        }
        _ => ValueType::Native(name.to_string()),
    }
}

fn resolve_pointer(name: &str, def: &CatalogueDef) -> PointerTarget {
    if name == def.scope.element {
        return PointerTarget::Element(name.to_string());
    }
    if name == STRING_TYPE {
        return PointerTarget::String;
    }
    if let Some(kind) = VectorKind::from_native_name(name) {
        return PointerTarget::Vector(kind);
    }
    match resolve_value(name, def) {
        ValueType::Struct(r) => PointerTarget::Struct(r),
        _ => PointerTarget::Native(name.to_string()),
    }
}

/// Converts a string to PascalCase.
#[must_use]
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = true;

    for c in s.chars() {
        if c == '_' || c == '-' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}
