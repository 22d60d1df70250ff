//! pybind11 code generation modules.

pub mod classify;
pub mod constructors;
pub mod properties;
pub mod walker;

pub use classify::{Category, Kind, classify, describe, element_type_name};
pub use constructors::ConstructorSynthesizer;
pub use properties::emit_property;
pub use walker::StructWalker;

use specbind_schema::ir::{Holder, StructDef, to_pascal_case};
use specbind_schema::types::StructRef;

/// Member through which wrapper objects reach their native struct.
pub const WRAPPED_HANDLE: &str = "ptr";

/// Namespace of the raw struct bindings.
pub const RAW_NAMESPACE: &str = "raw";

/// Names used by generated code to reach one native struct.
#[derive(Debug, Clone)]
pub struct Owner<'a> {
    /// Binding class variable, e.g. `mjsGeom`.
    pub class: &'a str,
    /// C++ type of `self`, e.g. `raw::MjsGeom`.
    pub native: String,
    holder: Holder,
}

impl<'a> Owner<'a> {
    /// Creates the owner names for a resolved struct.
    #[must_use]
    pub fn new(def: &'a StructDef) -> Self {
        let native = match def.holder {
            Holder::Raw => raw_type(&def.name),
            Holder::Wrapped => to_pascal_case(&def.name),
        };
        Self {
            class: &def.name,
            native,
            holder: def.holder,
        }
    }

    /// Returns the member access path for a field, relative to `self.`.
    #[must_use]
    pub fn path(&self, field: &str) -> String {
        match self.holder {
            Holder::Raw => field.to_string(),
            Holder::Wrapped => format!("{WRAPPED_HANDLE}->{field}"),
        }
    }
}

/// Returns the raw binding type for a struct name, e.g. `raw::MjsGeom`.
#[must_use]
pub fn raw_type(name: &str) -> String {
    format!("{RAW_NAMESPACE}::{}", to_pascal_case(name))
}

/// Returns the handle type used to pass a referenced struct.
///
/// Embedded structs are passed by reference, all others by pointer.
#[must_use]
pub fn struct_handle(r: &StructRef) -> String {
    let sigil = if r.inline { '&' } else { '*' };
    format!("{}{sigil}", raw_type(&r.name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_raw() {
        let def = StructDef::new("mjsGeom");
        let owner = Owner::new(&def);
        assert_eq!(owner.class, "mjsGeom");
        assert_eq!(owner.native, "raw::MjsGeom");
        assert_eq!(owner.path("size"), "size");
    }

    #[test]
    fn test_owner_wrapped() {
        let mut def = StructDef::new("mjSpec");
        def.holder = Holder::Wrapped;
        let owner = Owner::new(&def);
        assert_eq!(owner.native, "MjSpec");
        assert_eq!(owner.path("modelname"), "ptr->modelname");
    }

    #[test]
    fn test_struct_handle() {
        assert_eq!(struct_handle(&StructRef::new("mjsDefault")), "raw::MjsDefault*");
        assert_eq!(
            struct_handle(&StructRef::inline("mjsOrientation")),
            "raw::MjsOrientation&"
        );
    }
}
