//! Catalogue definitions as declared in the source file.
//!
//! These structures keep type names as written. [`crate::ir::Catalogue`]
//! resolves them into [`crate::types::FieldType`] values.

use crate::manifest::ConstructorManifest;
use crate::types::Scope;
use std::collections::HashMap;

/// Complete catalogue definition.
#[derive(Debug, Clone, Default)]
pub struct CatalogueDef {
    /// Naming conventions for the bound structs.
    pub scope: Scope,
    /// Struct declarations in file order.
    pub structs: Vec<StructDecl>,
    /// Constructor manifest, if the file declares one.
    pub constructors: Option<ConstructorManifest>,
    /// Struct lookup map (built while parsing).
    struct_map: HashMap<String, usize>,
}

impl CatalogueDef {
    /// Creates a new empty catalogue.
    #[must_use]
    pub fn new(scope: Scope) -> Self {
        Self {
            scope,
            ..Self::default()
        }
    }

    /// Adds a struct declaration.
    pub fn add_struct(&mut self, decl: StructDecl) {
        let index = self.structs.len();
        self.struct_map.insert(decl.name.clone(), index);
        self.structs.push(decl);
    }

    /// Looks up a struct by name.
    #[must_use]
    pub fn get_struct(&self, name: &str) -> Option<&StructDecl> {
        self.struct_map.get(name).map(|&idx| &self.structs[idx])
    }

    /// Returns true if a struct with the given name exists.
    #[must_use]
    pub fn has_struct(&self, name: &str) -> bool {
        self.struct_map.contains_key(name)
    }
}

/// Struct declaration.
#[derive(Debug, Clone)]
pub struct StructDecl {
    /// Struct name.
    pub name: String,
    /// Whether the struct is embedded in its owners.
    pub inline: bool,
    /// Fields in declaration order.
    pub fields: Vec<FieldDef>,
}

impl StructDecl {
    /// Creates a new struct declaration.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inline: false,
            fields: Vec::new(),
        }
    }

    /// Adds a field.
    pub fn add_field(&mut self, field: FieldDef) {
        self.fields.push(field);
    }
}

/// Declared shape of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeclKind {
    /// Held by value.
    #[default]
    Value,
    /// Held through a pointer.
    Pointer,
    /// Fixed-size array.
    Array,
}

impl DeclKind {
    /// Parses a declaration kind from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "value" => Some(Self::Value),
            "pointer" | "ptr" => Some(Self::Pointer),
            "array" => Some(Self::Array),
            _ => None,
        }
    }
}

/// Field declaration.
#[derive(Debug, Clone)]
pub struct FieldDef {
    /// Field name.
    pub name: String,
    /// Declared shape.
    pub kind: DeclKind,
    /// Declared element type name.
    pub type_name: String,
    /// Array extents (empty unless `kind` is `Array`).
    pub extents: Vec<usize>,
}

impl FieldDef {
    /// Creates a new field definition.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: DeclKind, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            type_name: type_name.into(),
            extents: Vec::new(),
        }
    }

    /// Creates an array field definition.
    #[must_use]
    pub fn array(name: impl Into<String>, type_name: impl Into<String>, extents: &[usize]) -> Self {
        let mut field = Self::new(name, DeclKind::Array, type_name);
        field.extents = extents.to_vec();
        field
    }
}
