//! Struct catalogue XML parser.
//!
//! This module parses catalogue files into the declared representation
//! ([`CatalogueDef`]). A catalogue lists native structs in order, their fields,
//! and optionally the constructor manifest.

use crate::catalogue::{CatalogueDef, DeclKind, FieldDef, StructDecl};
use crate::error::ParseError;
use crate::manifest::{ConstructorEntry, ConstructorManifest, ParentKind};
use crate::types::Scope;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Parses a struct catalogue from an XML string.
///
/// # Arguments
/// * `xml` - XML catalogue content
///
/// # Returns
/// Parsed catalogue or parse error.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed or contains invalid catalogue elements.
pub fn parse_catalogue(xml: &str) -> Result<CatalogueDef, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut catalogue: Option<CatalogueDef> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_bytes)?;
                if name == "catalogue" && catalogue.is_none() {
                    catalogue = Some(CatalogueDef::new(parse_scope(e)?));
                } else if let Some(cat) = catalogue.as_mut() {
                    match name {
                        "struct" => {
                            let decl = parse_struct(&mut reader, e)?;
                            add_struct(cat, decl)?;
                        }
                        "constructors" => {
                            if cat.constructors.is_some() {
                                return Err(ParseError::duplicate("constructors", "manifest"));
                            }
                            cat.constructors = Some(parse_constructors(&mut reader)?);
                        }
                        other => return Err(ParseError::unknown_element(other, "catalogue")),
                    }
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_bytes)?;
                if name == "catalogue" && catalogue.is_none() {
                    catalogue = Some(CatalogueDef::new(parse_scope(e)?));
                } else if let Some(cat) = catalogue.as_mut() {
                    match name {
                        "struct" => {
                            let decl = parse_struct_attributes(e)?;
                            add_struct(cat, decl)?;
                        }
                        "constructors" => {
                            if cat.constructors.is_some() {
                                return Err(ParseError::duplicate("constructors", "manifest"));
                            }
                            cat.constructors = Some(ConstructorManifest::new());
                        }
                        other => return Err(ParseError::unknown_element(other, "catalogue")),
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    catalogue.ok_or_else(|| ParseError::InvalidStructure {
        message: "No catalogue element found".to_string(),
    })
}

fn add_struct(catalogue: &mut CatalogueDef, decl: StructDecl) -> Result<(), ParseError> {
    if catalogue.has_struct(&decl.name) {
        return Err(ParseError::duplicate("struct", decl.name));
    }
    tracing::trace!(name = %decl.name, fields = decl.fields.len(), "parsed struct");
    catalogue.add_struct(decl);
    Ok(())
}

/// Parses the catalogue element attributes.
fn parse_scope(e: &BytesStart<'_>) -> Result<Scope, ParseError> {
    let mut scope = Scope::default();

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;

        match key {
            "prefix" => scope.prefix = value.to_string(),
            "root" => scope.root = value.to_string(),
            "element" => scope.element = value.to_string(),
            "body" => scope.body = value.to_string(),
            _ => {}
        }
    }

    if scope.prefix.is_empty() {
        return Err(ParseError::invalid_attr("catalogue", "prefix", ""));
    }

    Ok(scope)
}

/// Parses a struct element's attributes.
fn parse_struct_attributes(e: &BytesStart<'_>) -> Result<StructDecl, ParseError> {
    let mut name = None;
    let mut inline = false;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;

        match key {
            "name" => name = Some(value.to_string()),
            "inline" => inline = parse_bool("struct", "inline", value)?,
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("struct", "name"))?;
    let mut decl = StructDecl::new(name);
    decl.inline = inline;

    Ok(decl)
}

/// Parses a struct definition with its fields.
fn parse_struct(reader: &mut Reader<&[u8]>, e: &BytesStart<'_>) -> Result<StructDecl, ParseError> {
    let mut decl = parse_struct_attributes(e)?;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let tag_name = std::str::from_utf8(&name_bytes)?;
                if tag_name != "field" {
                    return Err(ParseError::unknown_element(tag_name, "struct"));
                }
                decl.add_field(parse_field(e)?);
            }
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let tag_name = std::str::from_utf8(&name_bytes)?;
                return Err(ParseError::unknown_element(tag_name, "struct"));
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => {
                return Err(ParseError::InvalidStructure {
                    message: format!("unterminated struct '{}'", decl.name),
                });
            }
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(decl)
}

/// Parses a field element.
fn parse_field(e: &BytesStart<'_>) -> Result<FieldDef, ParseError> {
    let mut name = None;
    let mut kind = DeclKind::Value;
    let mut type_name = None;
    let mut extents = Vec::new();

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;

        match key {
            "name" => name = Some(value.to_string()),
            "kind" => {
                kind = DeclKind::parse(value)
                    .ok_or_else(|| ParseError::invalid_attr("field", "kind", value))?
            }
            "type" => type_name = Some(value.to_string()),
            "extents" => extents = parse_extents(value)?,
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("field", "name"))?;
    let type_name = type_name.ok_or_else(|| ParseError::missing_attr("field", "type"))?;

    if kind != DeclKind::Array && !extents.is_empty() {
        return Err(ParseError::invalid_attr("field", "kind", format!("{kind:?}")));
    }

    let mut field = FieldDef::new(name, kind, type_name);
    field.extents = extents;

    Ok(field)
}

/// Parses a comma-separated extent list such as `3` or `2,3`.
fn parse_extents(value: &str) -> Result<Vec<usize>, ParseError> {
    value
        .split(',')
        .map(|part| {
            part.trim()
                .parse()
                .map_err(|_| ParseError::invalid_attr("field", "extents", value))
        })
        .collect()
}

/// Parses the constructors section.
fn parse_constructors(reader: &mut Reader<&[u8]>) -> Result<ConstructorManifest, ParseError> {
    let mut manifest = ConstructorManifest::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let tag_name = std::str::from_utf8(&name_bytes)?;
                if tag_name != "constructor" {
                    return Err(ParseError::unknown_element(tag_name, "constructors"));
                }
                manifest.push(parse_constructor(e)?);
            }
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let tag_name = std::str::from_utf8(&name_bytes)?;
                return Err(ParseError::unknown_element(tag_name, "constructors"));
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => {
                return Err(ParseError::InvalidStructure {
                    message: "unterminated constructors section".to_string(),
                });
            }
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(manifest)
}

/// Parses a constructor manifest entry.
fn parse_constructor(e: &BytesStart<'_>) -> Result<ConstructorEntry, ParseError> {
    let mut name = None;
    let mut parent = None;
    let mut has_default = false;
    let mut parent_frame = false;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;

        match key {
            "name" => name = Some(value.to_string()),
            "parent" => parent = Some(value.to_string()),
            "default" => has_default = parse_bool("constructor", "default", value)?,
            "parentFrame" => parent_frame = parse_bool("constructor", "parentFrame", value)?,
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("constructor", "name"))?;
    let parent = parent.ok_or_else(|| ParseError::missing_attr("constructor", "parent"))?;
    let parent = ParentKind::parse(&parent, parent_frame)
        .ok_or_else(|| ParseError::invalid_attr("constructor", "parent", &parent))?;

    if parent_frame && parent == ParentKind::Spec {
        return Err(ParseError::invalid_attr("constructor", "parentFrame", "true"));
    }

    Ok(ConstructorEntry::new(name, parent, has_default))
}

fn parse_bool(element: &str, attribute: &str, value: &str) -> Result<bool, ParseError> {
    match value {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ParseError::invalid_attr(element, attribute, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE_CATALOGUE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<catalogue prefix="mjs" root="mjSpec" element="mjsElement">
    <struct name="mjsElement"/>
    <struct name="mjsOrientation" inline="true">
        <field name="axisangle" kind="array" type="double" extents="4"/>
    </struct>
    <struct name="mjsSite" description="site specification">
        <field name="element" kind="pointer" type="mjsElement"/>
        <field name="pos" kind="array" type="double" extents="3"/>
        <field name="group" type="int"/>
        <field name="name" kind="pointer" type="mjString"/>
    </struct>
    <constructors>
        <constructor name="mjsSite" parent="body" default="true"/>
    </constructors>
</catalogue>"#;

    #[test]
    fn test_parse_simple_catalogue() {
        let def = parse_catalogue(SIMPLE_CATALOGUE).expect("Failed to parse");

        assert_eq!(def.scope, Scope::default());
        assert_eq!(def.structs.len(), 3);
        assert!(def.get_struct("mjsOrientation").expect("parsed").inline);

        let site = def.get_struct("mjsSite").expect("parsed");
        assert_eq!(site.fields.len(), 4);
        assert_eq!(site.fields[0].kind, DeclKind::Pointer);
        assert_eq!(site.fields[1].extents, vec![3]);
        assert_eq!(site.fields[2].kind, DeclKind::Value);
        assert_eq!(site.fields[3].type_name, "mjString");
    }

    #[test]
    fn test_parse_constructors() {
        let def = parse_catalogue(SIMPLE_CATALOGUE).expect("Failed to parse");
        let manifest = def.constructors.expect("manifest parsed");

        assert_eq!(manifest.len(), 1);
        let entry = manifest.iter().next().expect("entry");
        assert_eq!(entry.name, "mjsSite");
        assert_eq!(entry.parent, ParentKind::Body { parent_frame: false });
        assert!(entry.has_default);
    }

    #[test]
    fn test_parse_multi_dimensional_extents() {
        let xml = r#"<catalogue>
    <struct name="mjsFlex">
        <field name="grid" kind="array" type="double" extents="2, 3"/>
    </struct>
</catalogue>"#;

        let def = parse_catalogue(xml).expect("Failed to parse");
        assert_eq!(def.structs[0].fields[0].extents, vec![2, 3]);
    }

    #[test]
    fn test_parse_unknown_parent() {
        let xml = r#"<catalogue>
    <constructors>
        <constructor name="mjsSite" parent="world"/>
    </constructors>
</catalogue>"#;

        let result = parse_catalogue(xml);
        assert!(matches!(
            result,
            Err(ParseError::InvalidAttribute { ref attribute, .. }) if attribute == "parent"
        ));
    }

    #[test]
    fn test_parse_parent_frame_requires_body() {
        let xml = r#"<catalogue>
    <constructors>
        <constructor name="mjsFrame" parent="spec" parentFrame="true"/>
    </constructors>
</catalogue>"#;

        assert!(parse_catalogue(xml).is_err());
    }

    #[test]
    fn test_parse_missing_field_type() {
        let xml = r#"<catalogue>
    <struct name="mjsSite">
        <field name="pos"/>
    </struct>
</catalogue>"#;

        let result = parse_catalogue(xml);
        assert!(matches!(result, Err(ParseError::MissingAttribute { .. })));
    }

    #[test]
    fn test_parse_invalid_kind() {
        let xml = r#"<catalogue>
    <struct name="mjsSite">
        <field name="pos" kind="reference" type="double"/>
    </struct>
</catalogue>"#;

        assert!(parse_catalogue(xml).is_err());
    }

    #[test]
    fn test_parse_duplicate_struct() {
        let xml = r#"<catalogue>
    <struct name="mjsSite"/>
    <struct name="mjsSite"/>
</catalogue>"#;

        let result = parse_catalogue(xml);
        assert!(matches!(result, Err(ParseError::DuplicateDefinition { .. })));
    }

    #[test]
    fn test_parse_duplicate_constructors() {
        let filled_then_empty = r#"<catalogue>
    <struct name="mjsSite"/>
    <constructors>
        <constructor name="mjsSite" parent="body" default="true"/>
    </constructors>
    <constructors/>
</catalogue>"#;
        let empty_then_filled = r#"<catalogue>
    <constructors/>
    <constructors>
        <constructor name="mjsSite" parent="body"/>
    </constructors>
</catalogue>"#;

        for xml in [filled_then_empty, empty_then_filled] {
            let result = parse_catalogue(xml);
            assert!(matches!(
                result,
                Err(ParseError::DuplicateDefinition { ref kind, .. }) if kind == "constructors"
            ));
        }
    }

    #[test]
    fn test_parse_unknown_element() {
        let xml = r#"<catalogue>
    <struct name="mjsSite">
        <method name="pos"/>
    </struct>
</catalogue>"#;

        let result = parse_catalogue(xml);
        assert!(matches!(result, Err(ParseError::UnknownElement { .. })));
    }

    #[test]
    fn test_parse_no_catalogue() {
        let result = parse_catalogue("<other/>");
        assert!(matches!(result, Err(ParseError::InvalidStructure { .. })));
    }

    #[test]
    fn test_parse_custom_scope() {
        let xml = r#"<catalogue prefix="xs" root="xSpec" element="xsNode" body="xsBody"/>"#;

        let def = parse_catalogue(xml).expect("Failed to parse");
        assert_eq!(def.scope.prefix, "xs");
        assert_eq!(def.scope.root, "xSpec");
        assert_eq!(def.scope.element, "xsNode");
        assert_eq!(def.scope.body, "xsBody");
        assert!(def.structs.is_empty());
    }
}
