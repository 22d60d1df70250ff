//! # specbind Codegen
//!
//! pybind11 binding generation from native struct catalogues.
//!
//! This crate provides:
//! - Property accessors for every bound struct field
//! - Keyword-argument `add_*` constructors for manifest entries
//! - File and string entry points

pub mod error;
pub mod generator;
pub mod pybind;

pub use error::CodegenError;
pub use generator::Generator;

use specbind_schema::{Catalogue, ConstructorManifest};

/// Parses and resolves a catalogue, together with its constructor manifest.
///
/// The manifest is the catalogue's `<constructors>` section when present,
/// otherwise [`ConstructorManifest::standard`].
///
/// # Errors
/// Returns `CodegenError` if parsing fails, or if `validate` is set and the
/// catalogue or manifest is inconsistent.
pub fn load_from_xml(
    xml: &str,
    validate: bool,
) -> Result<(Catalogue, ConstructorManifest), CodegenError> {
    let mut def = specbind_schema::parse_catalogue(xml)?;
    let manifest = def
        .constructors
        .take()
        .unwrap_or_else(ConstructorManifest::standard);

    if validate {
        specbind_schema::validate_catalogue(&def)?;
        specbind_schema::validate_manifest(&def, &manifest)?;
    }

    let catalogue = Catalogue::from_def(&def);
    tracing::debug!(
        structs = catalogue.structs.len(),
        constructors = manifest.len(),
        "loaded catalogue"
    );
    Ok((catalogue, manifest))
}

/// Generates bindings from a catalogue XML string.
///
/// # Arguments
/// * `xml` - Catalogue XML content
///
/// # Returns
/// Generated C++ binding code as a string.
///
/// # Errors
/// Returns `CodegenError` if parsing, validation, or generation fails.
pub fn generate_from_xml(xml: &str) -> Result<String, CodegenError> {
    let (catalogue, manifest) = load_from_xml(xml, true)?;
    Generator::new(&catalogue, &manifest).generate()
}

/// Generates bindings from a catalogue XML file.
///
/// # Arguments
/// * `path` - Path to the catalogue XML file
///
/// # Returns
/// Generated C++ binding code as a string.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, validation, or generation fails.
pub fn generate_from_file(path: &std::path::Path) -> Result<String, CodegenError> {
    let xml = std::fs::read_to_string(path)?;
    generate_from_xml(&xml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const WIDGET_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<catalogue>
  <struct name="mjsElement"/>
  <struct name="mjsWidget">
    <field name="element" kind="pointer" type="mjsElement"/>
    <field name="name" kind="pointer" type="mjString"/>
    <field name="count" type="int"/>
  </struct>
  <constructors>
    <constructor name="mjsWidget" parent="spec"/>
  </constructors>
</catalogue>"#;

    #[test]
    fn test_generate_from_xml() {
        let output = generate_from_xml(WIDGET_XML).expect("generates");

        assert!(output.starts_with("\n  // mjsWidget\n"));
        assert!(!output.contains("\"element\""));
        assert!(output.contains("valid_kwargs = {\"name\", \"count\"};"));
        assert!(output.contains("auto out = mjs_addWidget(self.ptr);"));
    }

    #[test]
    fn test_generate_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(WIDGET_XML.as_bytes()).expect("write catalogue");

        let from_file = generate_from_file(file.path()).expect("generates");
        let from_str = generate_from_xml(WIDGET_XML).expect("generates");
        assert_eq!(from_file, from_str);
    }

    #[test]
    fn test_generate_from_missing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let result = generate_from_file(&dir.path().join("missing.xml"));
        assert!(matches!(result, Err(CodegenError::Io(_))));
    }

    #[test]
    fn test_standard_manifest_when_absent() {
        let xml = r#"<catalogue><struct name="mjsGeom"/></catalogue>"#;

        let (_, manifest) = load_from_xml(xml, false).expect("loads");
        assert_eq!(manifest.len(), ConstructorManifest::standard().len());

        let result = load_from_xml(xml, true);
        assert!(matches!(result, Err(CodegenError::Schema(_))));
    }

    #[test]
    fn test_unknown_manifest_struct_without_validation() {
        let xml = r#"<catalogue>
  <constructors><constructor name="mjsGhost" parent="body"/></constructors>
</catalogue>"#;

        let (catalogue, manifest) = load_from_xml(xml, false).expect("loads");
        let result = Generator::new(&catalogue, &manifest).generate();
        assert!(matches!(result, Err(CodegenError::UnknownStruct { .. })));
    }

    #[test]
    fn test_unsupported_field_is_fatal() {
        let xml = r#"<catalogue>
  <struct name="mjsFlex">
    <field name="grid" kind="array" type="double" extents="2,3"/>
  </struct>
  <constructors/>
</catalogue>"#;

        let result = generate_from_xml(xml);
        assert!(matches!(result, Err(CodegenError::UnsupportedField { .. })));
    }

    #[test]
    fn test_root_option_struct_bound_by_reference() {
        let xml = r#"<catalogue>
  <struct name="mjOption">
    <field name="timestep" type="mjtNum"/>
  </struct>
  <struct name="mjSpec">
    <field name="option" type="mjOption"/>
  </struct>
  <constructors/>
</catalogue>"#;

        let output = generate_from_xml(xml).expect("generates");
        assert!(!output.contains("// mjOption"));
        assert!(output.contains("\n  // mjSpec\nmjSpec.def_property(\"option\","));
        assert!(output.contains("[](MjSpec& self) -> mjOption& {"));
        assert!(!output.contains("raw::MjOption"));
    }

    #[test]
    fn test_invalid_xml() {
        let result = generate_from_xml("<catalogue><struct name=\"mjsGeom\">");
        assert!(result.is_err());
    }
}
