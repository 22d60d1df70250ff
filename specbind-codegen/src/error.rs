//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Catalogue parse error.
    #[error("catalogue parse error: {0}")]
    Parse(#[from] specbind_schema::ParseError),

    /// Catalogue validation error.
    #[error("catalogue error: {0}")]
    Schema(#[from] specbind_schema::SchemaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Field shape with no binding rule.
    #[error("unsupported field '{owner}.{field}': {shape}")]
    UnsupportedField {
        /// Owning struct name.
        owner: String,
        /// Field name.
        field: String,
        /// Description of the rejected shape.
        shape: String,
    },

    /// Manifest entry naming a struct the catalogue does not define.
    #[error("constructor manifest names unknown struct '{name}'")]
    UnknownStruct {
        /// Struct name.
        name: String,
    },
}

impl CodegenError {
    /// Creates an unsupported field error.
    pub fn unsupported(
        owner: impl Into<String>,
        field: impl Into<String>,
        shape: impl Into<String>,
    ) -> Self {
        Self::UnsupportedField {
            owner: owner.into(),
            field: field.into(),
            shape: shape.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_display() {
        let err = CodegenError::unsupported("mjsFlex", "grid", "array with 2 extents");
        assert_eq!(
            err.to_string(),
            "unsupported field 'mjsFlex.grid': array with 2 extents"
        );
    }

    #[test]
    fn test_from_schema_error() {
        let err: CodegenError = specbind_schema::SchemaError::StructNotFound {
            name: "mjsGeom".into(),
        }
        .into();
        assert!(matches!(err, CodegenError::Schema(_)));
    }
}
