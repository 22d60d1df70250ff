//! Field shape classification.

use specbind_schema::types::FieldType;

/// Structural kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Held by value.
    Value,
    /// Held through a pointer.
    Pointer,
    /// Fixed-size array.
    Array,
}

/// Returns the structural kind of a field type.
#[must_use]
pub fn classify(ty: &FieldType) -> Kind {
    match ty {
        FieldType::Value(_) => Kind::Value,
        FieldType::Pointer(_) => Kind::Pointer,
        FieldType::Array { .. } => Kind::Array,
    }
}

/// Returns the printable name of a pointer's or array's element type.
#[must_use]
pub fn element_type_name(ty: &FieldType) -> Option<String> {
    match ty {
        FieldType::Value(_) => None,
        FieldType::Pointer(target) => Some(target.decl()),
        FieldType::Array { element, .. } => Some(element.decl().to_string()),
    }
}

/// Describes a field shape for diagnostics, e.g. `pointer to 'int'`.
#[must_use]
pub fn describe(ty: &FieldType) -> String {
    let element = element_type_name(ty).unwrap_or_default();
    match (classify(ty), ty) {
        (Kind::Array, FieldType::Array { extents, .. }) if extents.len() != 1 => {
            format!("array of '{element}' with {} extents", extents.len())
        }
        (Kind::Array, _) => format!("array of '{element}'"),
        (Kind::Pointer, _) => format!("pointer to '{element}'"),
        (Kind::Value, _) => "value".to_string(),
    }
}

/// Keyword assignment category used by generated constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Native string handle.
    String,
    /// Dynamic vector handle.
    Vector,
    /// One-dimensional fixed-size array.
    Array,
    /// Plain value.
    Value,
}

impl Category {
    /// Name of the helper closure that assigns this category.
    #[must_use]
    pub const fn setter(&self) -> &'static str {
        match self {
            Self::String => "set_string",
            Self::Vector => "set_vec",
            Self::Array => "set_array",
            Self::Value => "set_value",
        }
    }
}
