//! Prelude module for convenient imports.
//!
//! ```ignore
//! use specbind::prelude::*;
//! ```

// Catalogue types
pub use specbind_schema::{
    Catalogue, ConstructorEntry, ConstructorManifest, FieldDecl, FieldType, ParentKind,
    ParseError, SchemaError, Scope, StructDef,
};

// Generation
pub use specbind_codegen::{
    CodegenError, Generator, generate_from_file, generate_from_xml, load_from_xml,
};
