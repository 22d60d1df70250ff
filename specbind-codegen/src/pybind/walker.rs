//! Property section generation.

use super::emit_property;
use crate::error::CodegenError;
use specbind_schema::ir::Catalogue;

/// Walks the catalogue and collects the property bindings of every bound struct.
pub struct StructWalker<'a> {
    catalogue: &'a Catalogue,
}

impl<'a> StructWalker<'a> {
    /// Creates a new struct walker.
    #[must_use]
    pub fn new(catalogue: &'a Catalogue) -> Self {
        Self { catalogue }
    }

    /// Generates the property section.
    ///
    /// Each bound struct gets a banner comment followed by one fragment per
    /// field, in declaration order.
    ///
    /// # Errors
    /// Returns the first error raised for an unsupported field.
    pub fn generate(&self) -> Result<String, CodegenError> {
        let mut output = String::new();

        for def in self.catalogue.bound_structs() {
            tracing::debug!(name = %def.name, fields = def.fields.len(), "walking struct");
            output.push_str(&format!("\n  // {}\n", def.name));

            for field in &def.fields {
                if let Some(fragment) = emit_property(def, field)? {
                    output.push_str(&fragment);
                    output.push('\n');
                }
            }
        }

        Ok(output)
    }
}
