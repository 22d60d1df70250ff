//! Field type definitions.
//!
//! This module contains the closed set of field shapes a catalogue can
//! describe. Native type names are mapped onto these enums once, while the
//! catalogue is resolved, so later stages never compare type names.

/// Name of the opaque native string handle.
pub const STRING_TYPE: &str = "mjString";

/// Scalar types that are bound by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    /// 32-bit integer (`int`).
    Int,
    /// Double-precision float (`double`).
    Double,
    /// Single-precision float (`float`).
    Float,
    /// Native byte (`mjtByte`).
    Byte,
    /// Native numeric type (`mjtNum`).
    Num,
}

impl ScalarType {
    /// Returns the native type name.
    #[must_use]
    pub const fn native_name(&self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Double => "double",
            Self::Float => "float",
            Self::Byte => "mjtByte",
            Self::Num => "mjtNum",
        }
    }

    /// Parses a scalar type from its native name.
    #[must_use]
    pub fn from_native_name(name: &str) -> Option<Self> {
        match name {
            "int" => Some(Self::Int),
            "double" => Some(Self::Double),
            "float" => Some(Self::Float),
            "mjtByte" => Some(Self::Byte),
            "mjtNum" => Some(Self::Num),
            _ => None,
        }
    }

    /// Returns the fixed-size vector wrapper used for arrays of this scalar.
    ///
    /// Types without a dedicated wrapper fall back to their native name.
    #[must_use]
    pub const fn array_wrapper(&self) -> &'static str {
        match self {
            Self::Double | Self::Num => "MjDouble",
            Self::Float => "MjFloat",
            Self::Int => "MjInt",
            Self::Byte => "mjtByte",
        }
    }
}

/// Numeric element types stored in dynamic vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericType {
    /// `double` elements.
    Double,
    /// `float` elements.
    Float,
    /// `int` elements.
    Int,
}

impl NumericType {
    /// Returns the element type name used in generated code.
    #[must_use]
    pub const fn native_name(&self) -> &'static str {
        match self {
            Self::Double => "double",
            Self::Float => "float",
            Self::Int => "int",
        }
    }

    const fn handle_stem(&self) -> &'static str {
        match self {
            Self::Double => "Double",
            Self::Float => "Float",
            Self::Int => "Int",
        }
    }

    fn from_handle_stem(stem: &str) -> Option<Self> {
        match stem {
            "Double" => Some(Self::Double),
            "Float" => Some(Self::Float),
            "Int" => Some(Self::Int),
            _ => None,
        }
    }
}

/// Dynamic vector handles owned by a native struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VectorKind {
    /// Vector of numbers (`mjDoubleVec`, `mjFloatVec`, `mjIntVec`).
    Numeric(NumericType),
    /// Vector of bytes (`mjByteVec`).
    Byte,
    /// Vector of strings (`mjStringVec`).
    String,
    /// Vector of numeric vectors (`mjDoubleVecVec`, ...).
    Nested(NumericType),
}

impl VectorKind {
    /// Returns the native handle name.
    #[must_use]
    pub fn native_name(&self) -> String {
        match self {
            Self::Numeric(n) => format!("mj{}Vec", n.handle_stem()),
            Self::Byte => "mjByteVec".to_string(),
            Self::String => "mjStringVec".to_string(),
            Self::Nested(n) => format!("mj{}VecVec", n.handle_stem()),
        }
    }

    /// Parses a vector kind from its native handle name.
    #[must_use]
    pub fn from_native_name(name: &str) -> Option<Self> {
        match name {
            "mjByteVec" => return Some(Self::Byte),
            "mjStringVec" => return Some(Self::String),
            _ => {}
        }
        let stem = name.strip_prefix("mj")?;
        if let Some(inner) = stem.strip_suffix("VecVec") {
            return NumericType::from_handle_stem(inner).map(Self::Nested);
        }
        stem.strip_suffix("Vec")
            .and_then(NumericType::from_handle_stem)
            .map(Self::Numeric)
    }
}

/// Reference to another struct in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructRef {
    /// Referenced struct name.
    pub name: String,
    /// Whether the struct is embedded in its owner rather than heap-allocated.
    pub inline: bool,
}

impl StructRef {
    /// Creates a reference to a heap-allocated struct.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inline: false,
        }
    }

    /// Creates a reference to an embedded struct.
    #[must_use]
    pub fn inline(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inline: true,
        }
    }
}

/// Types that can be held by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// Scalar bound by copy.
    Scalar(ScalarType),
    /// Single character.
    Char,
    /// Nested struct.
    Struct(StructRef),
    /// Any other named native type, such as an enumeration.
    Native(String),
}

impl ValueType {
    /// Returns the declared type name.
    #[must_use]
    pub fn decl(&self) -> &str {
        match self {
            Self::Scalar(s) => s.native_name(),
            Self::Char => "char",
            Self::Struct(r) => &r.name,
            Self::Native(name) => name,
        }
    }

    /// Returns true for scalars that are copied across the boundary.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }
}

/// Targets a pointer field can refer to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PointerTarget {
    /// Back-reference into the owning element graph. Never bound.
    Element(String),
    /// Another struct.
    Struct(StructRef),
    /// Opaque native string.
    String,
    /// Dynamic vector.
    Vector(VectorKind),
    /// Any other native type. Not bindable.
    Native(String),
}

impl PointerTarget {
    /// Returns the declared pointee type name.
    #[must_use]
    pub fn decl(&self) -> String {
        match self {
            Self::Element(name) | Self::Native(name) => name.clone(),
            Self::Struct(r) => r.name.clone(),
            Self::String => STRING_TYPE.to_string(),
            Self::Vector(v) => v.native_name(),
        }
    }
}

/// Type of a struct field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Field held by value.
    Value(ValueType),
    /// Field held through a pointer.
    Pointer(PointerTarget),
    /// Fixed-size array.
    Array {
        /// Element type.
        element: ValueType,
        /// Array extents, outermost first.
        extents: Vec<usize>,
    },
}

impl FieldType {
    /// Returns true for the back-reference sentinel.
    #[must_use]
    pub const fn is_element_ref(&self) -> bool {
        matches!(self, Self::Pointer(PointerTarget::Element(_)))
    }
}

/// Naming conventions that select which structs are bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    /// Prefix shared by all spec element structs.
    pub prefix: String,
    /// Root specification struct.
    pub root: String,
    /// Graph element struct, only used as a back-reference.
    pub element: String,
    /// Body struct that owns nested elements.
    pub body: String,
}

impl Default for Scope {
    fn default() -> Self {
        Self {
            prefix: "mjs".to_string(),
            root: "mjSpec".to_string(),
            element: "mjsElement".to_string(),
            body: "mjsBody".to_string(),
        }
    }
}

impl Scope {
    /// Returns true if bindings should be generated for the named struct.
    #[must_use]
    pub fn in_scope(&self, name: &str) -> bool {
        (name.starts_with(&self.prefix) || name == self.root) && name != self.element
    }

    /// Strips the element prefix, e.g. `mjsGeom` -> `Geom`.
    #[must_use]
    pub fn element_stem<'a>(&self, name: &'a str) -> &'a str {
        name.strip_prefix(self.prefix.as_str()).unwrap_or(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_native_names() {
        for scalar in [
            ScalarType::Int,
            ScalarType::Double,
            ScalarType::Float,
            ScalarType::Byte,
            ScalarType::Num,
        ] {
            assert_eq!(ScalarType::from_native_name(scalar.native_name()), Some(scalar));
        }
        assert_eq!(ScalarType::from_native_name("char"), None);
        assert_eq!(ScalarType::from_native_name("mjtGeom"), None);
    }

    #[test]
    fn test_array_wrapper() {
        assert_eq!(ScalarType::Double.array_wrapper(), "MjDouble");
        assert_eq!(ScalarType::Num.array_wrapper(), "MjDouble");
        assert_eq!(ScalarType::Float.array_wrapper(), "MjFloat");
        assert_eq!(ScalarType::Int.array_wrapper(), "MjInt");
    }

    #[test]
    fn test_vector_kind_from_native_name() {
        assert_eq!(
            VectorKind::from_native_name("mjDoubleVec"),
            Some(VectorKind::Numeric(NumericType::Double))
        );
        assert_eq!(
            VectorKind::from_native_name("mjIntVec"),
            Some(VectorKind::Numeric(NumericType::Int))
        );
        assert_eq!(VectorKind::from_native_name("mjByteVec"), Some(VectorKind::Byte));
        assert_eq!(
            VectorKind::from_native_name("mjStringVec"),
            Some(VectorKind::String)
        );
        assert_eq!(
            VectorKind::from_native_name("mjFloatVecVec"),
            Some(VectorKind::Nested(NumericType::Float))
        );
        assert_eq!(VectorKind::from_native_name("mjString"), None);
        assert_eq!(VectorKind::from_native_name("mjByteVecVec"), None);
    }

    #[test]
    fn test_vector_kind_native_name() {
        assert_eq!(VectorKind::Numeric(NumericType::Float).native_name(), "mjFloatVec");
        assert_eq!(VectorKind::Nested(NumericType::Int).native_name(), "mjIntVecVec");
    }

    #[test]
    fn test_value_type_decl() {
        assert_eq!(ValueType::Scalar(ScalarType::Num).decl(), "mjtNum");
        assert_eq!(ValueType::Char.decl(), "char");
        assert_eq!(ValueType::Struct(StructRef::new("mjsPlugin")).decl(), "mjsPlugin");
        assert!(!ValueType::Native("mjtGeom".into()).is_scalar());
    }

    #[test]
    fn test_scope_in_scope() {
        let scope = Scope::default();
        assert!(scope.in_scope("mjsGeom"));
        assert!(scope.in_scope("mjSpec"));
        assert!(!scope.in_scope("mjsElement"));
        assert!(!scope.in_scope("mjModel"));
    }

    #[test]
    fn test_scope_element_stem() {
        let scope = Scope::default();
        assert_eq!(scope.element_stem("mjsHField"), "HField");
        assert_eq!(scope.element_stem("mjSpec"), "mjSpec");
    }
}
