//! # specbind
//!
//! pybind11 binding generator for native spec structs.
//!
//! Given a catalogue of native struct shapes, specbind emits a property
//! accessor for every bindable field and a keyword-argument `add_*`
//! constructor for every struct in the constructor manifest.
//!
//! ## Quick Start
//!
//! ```ignore
//! use specbind::prelude::*;
//!
//! let (catalogue, manifest) = load_from_xml(&xml, true)?;
//! let code = Generator::new(&catalogue, &manifest).generate()?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Catalogue parsing, validation and field shapes
//! - [`codegen`] - Property and constructor generation

pub mod cli;
pub mod prelude;

/// Catalogue parsing and validation.
pub mod schema {
    pub use specbind_schema::*;
}

/// Binding code generation.
pub mod codegen {
    pub use specbind_codegen::*;
}
