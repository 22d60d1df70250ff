//! Binding generation driver.

use crate::error::CodegenError;
use crate::pybind::{ConstructorSynthesizer, StructWalker};
use specbind_schema::ir::Catalogue;
use specbind_schema::manifest::ConstructorManifest;

/// Sequences property and constructor generation over one catalogue.
pub struct Generator<'a> {
    catalogue: &'a Catalogue,
    manifest: &'a ConstructorManifest,
}

impl<'a> Generator<'a> {
    /// Creates a new generator.
    #[must_use]
    pub fn new(catalogue: &'a Catalogue, manifest: &'a ConstructorManifest) -> Self {
        Self {
            catalogue,
            manifest,
        }
    }

    /// Generates all properties followed by all constructors.
    ///
    /// # Errors
    /// Returns the first error raised by either section.
    pub fn generate(&self) -> Result<String, CodegenError> {
        let mut output = self.generate_properties()?;
        output.push_str(&self.generate_constructors()?);
        Ok(output)
    }

    /// Generates the property section only.
    ///
    /// # Errors
    /// Returns `CodegenError::UnsupportedField` for fields with no binding rule.
    pub fn generate_properties(&self) -> Result<String, CodegenError> {
        StructWalker::new(self.catalogue).generate()
    }

    /// Generates the constructor section only.
    ///
    /// # Errors
    /// Returns `CodegenError::UnknownStruct` for manifest entries missing from
    /// the catalogue.
    pub fn generate_constructors(&self) -> Result<String, CodegenError> {
        ConstructorSynthesizer::new(self.catalogue).generate(self.manifest)
    }
}
