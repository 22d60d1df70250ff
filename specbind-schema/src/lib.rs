//! # specbind Schema
//!
//! Struct catalogue model and loader.
//!
//! This crate provides:
//! - XML parsing of native struct catalogues
//! - The closed set of field shapes used by code generation
//! - Catalogue validation
//! - The constructor manifest
//! - A resolved representation for code generation

pub mod catalogue;
pub mod error;
pub mod ir;
pub mod manifest;
pub mod parser;
pub mod types;
pub mod validation;

pub use catalogue::{CatalogueDef, DeclKind, FieldDef, StructDecl};
pub use error::{ParseError, SchemaError};
pub use ir::{Catalogue, FieldDecl, Holder, StructDef};
pub use manifest::{ConstructorEntry, ConstructorManifest, ParentKind};
pub use parser::parse_catalogue;
pub use types::{
    FieldType, NumericType, PointerTarget, STRING_TYPE, ScalarType, Scope, StructRef, ValueType,
    VectorKind,
};
pub use validation::{validate_catalogue, validate_manifest};
