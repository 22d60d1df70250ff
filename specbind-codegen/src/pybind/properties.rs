//! Property accessor generation.
//!
//! Each bound field becomes one `def_property` call. The shape of the field
//! selects the getter/setter pair and whether the returned handle must keep
//! its owner alive (`reference_internal`).

use super::{Owner, classify, describe, struct_handle};
use crate::error::CodegenError;
use specbind_schema::ir::{FieldDecl, StructDef};
use specbind_schema::types::{FieldType, NumericType, PointerTarget, ValueType, VectorKind};

const REFERENCE_INTERNAL: &str = "py::return_value_policy::reference_internal";

/// Generates the property binding for one field.
///
/// # Returns
/// The `def_property` fragment, or `None` for the element back-reference,
/// which is never bound.
///
/// # Errors
/// Returns `CodegenError::UnsupportedField` for shapes with no binding rule,
/// including multi-dimensional arrays.
pub fn emit_property(
    owner: &StructDef,
    field: &FieldDecl,
) -> Result<Option<String>, CodegenError> {
    let names = Owner::new(owner);
    let unsupported = || CodegenError::unsupported(&owner.name, &field.name, describe(&field.ty));

    let code = match &field.ty {
        FieldType::Value(value) => value_property(&names, &field.name, value),
        FieldType::Pointer(target) => match target {
            PointerTarget::Element(_) => return Ok(None),
            PointerTarget::Struct(r) => {
                reference_property(&names, &field.name, &struct_handle(r))
            }
            PointerTarget::String => string_property(&names, &field.name),
            PointerTarget::Vector(kind) => vector_property(&names, &field.name, *kind),
            PointerTarget::Native(_) => return Err(unsupported()),
        },
        FieldType::Array { element, extents } => {
            let [extent] = extents.as_slice() else {
                return Err(unsupported());
            };
            match element {
                ValueType::Char => char_array_property(&names, &field.name, *extent),
                ValueType::Scalar(scalar) => {
                    fixed_array_property(&names, &field.name, scalar.array_wrapper(), *extent)
                }
                ValueType::Struct(_) | ValueType::Native(_) => return Err(unsupported()),
            }
        }
    };

    tracing::trace!(
        owner = %owner.name,
        field = %field.name,
        kind = ?classify(&field.ty),
        "emitted property"
    );
    Ok(Some(code))
}

/// Value field: scalars by copy, everything else by reference into the owner.
fn value_property(owner: &Owner<'_>, name: &str, value: &ValueType) -> String {
    match value {
        ValueType::Scalar(scalar) => accessor_pair(owner, name, scalar.native_name(), false),
        ValueType::Struct(r) => reference_property(owner, name, &struct_handle(r)),
        ValueType::Char | ValueType::Native(_) => {
            reference_property(owner, name, &format!("{}&", value.decl()))
        }
    }
}

fn reference_property(owner: &Owner<'_>, name: &str, handle: &str) -> String {
    accessor_pair(owner, name, handle, true)
}

/// Plain getter/setter pair returning and accepting `ty`.
fn accessor_pair(owner: &Owner<'_>, name: &str, ty: &str, by_reference: bool) -> String {
    let class = owner.class;
    let native = &owner.native;
    let path = owner.path(name);

    let mut output = format!("{class}.def_property(\"{name}\",");
    output.push_str(&format!("[]({native}& self) -> {ty} {{\n"));
    output.push_str(&format!("        return self.{path};\n"));
    output.push_str("      },");
    output.push_str(&format!("[]({native}& self, {ty} {name}) {{\n"));
    output.push_str(&format!("        self.{path} = {name};\n"));
    output.push_str("      }");
    if by_reference {
        output.push(',');
        output.push_str(REFERENCE_INTERNAL);
    }
    output.push_str(");");
    output
}

/// Opaque native string exposed as a string view.
fn string_property(owner: &Owner<'_>, name: &str) -> String {
    let native = &owner.native;
    let path = owner.path(name);

    let mut output = property_head(owner, name);
    output.push_str(&format!("    []({native}& self) -> std::string_view {{\n"));
    output.push_str(&format!("        return *self.{path};\n"));
    output.push_str("      },\n");
    output.push_str(&format!("    []({native}& self, std::string_view {name}) {{\n"));
    output.push_str(&format!("        *(self.{path}) = {name};\n"));
    output.push_str("    });");
    output
}

fn vector_property(owner: &Owner<'_>, name: &str, kind: VectorKind) -> String {
    match kind {
        VectorKind::Numeric(numeric) => numeric_vector_property(owner, name, numeric),
        VectorKind::Byte => list_vector_property(owner, name, "const std::byte"),
        VectorKind::String => list_vector_property(owner, name, "std::string"),
        VectorKind::Nested(numeric) => nested_vector_property(owner, name, numeric),
    }
}

/// Numeric vector exposed as a buffer view over its current contents.
fn numeric_vector_property(owner: &Owner<'_>, name: &str, numeric: NumericType) -> String {
    let native = &owner.native;
    let path = owner.path(name);
    let ty = numeric.native_name();

    let mut output = property_head(owner, name);
    output.push_str(&format!("    []({native}& self) -> py::array_t<{ty}> {{\n"));
    output.push_str(&format!("        return py::array_t<{ty}>(self.{path}->size(),\n"));
    output.push_str(&format!("                                      self.{path}->data());\n"));
    output.push_str("      },\n");
    output.push_str(&refill_setter(owner, name, &format!("py::cast<{ty}>(val)")));
    output
}

/// Vector copied element by element into a list.
fn list_vector_property(owner: &Owner<'_>, name: &str, cast: &str) -> String {
    let native = &owner.native;
    let path = owner.path(name);

    let mut output = property_head(owner, name);
    output.push_str(&format!("    []({native}& self) -> py::list {{\n"));
    output.push_str("        py::list list;\n");
    output.push_str(&format!("        for (auto val : *self.{path}) {{\n"));
    output.push_str("          list.append(val);\n");
    output.push_str("        }\n");
    output.push_str("        return list;\n");
    output.push_str("      },\n");
    output.push_str(&refill_setter(owner, name, &format!("py::cast<{cast}>(val)")));
    output
}

/// Vector of vectors exposed as a list of lists.
fn nested_vector_property(owner: &Owner<'_>, name: &str, numeric: NumericType) -> String {
    let native = &owner.native;
    let path = owner.path(name);
    let ty = numeric.native_name();

    let mut output = property_head(owner, name);
    output.push_str(&format!("    []({native}& self) -> py::list {{\n"));
    output.push_str("        py::list list;\n");
    output.push_str(&format!("        for (auto inner_vec : *self.{path}) {{\n"));
    output.push_str("          py::list inner_list;\n");
    output.push_str("          for (auto val : inner_vec) {\n");
    output.push_str("            inner_list.append(val);\n");
    output.push_str("          }\n");
    output.push_str("          list.append(inner_list);\n");
    output.push_str("        }\n");
    output.push_str("        return list;\n");
    output.push_str("      },\n");
    output.push_str(&format!("    []({native}& self, py::object rhs) {{\n"));
    output.push_str(&format!("        self.{path}->clear();\n"));
    output.push_str(&format!("        self.{path}->reserve(py::len(rhs));\n"));
    output.push_str("        for (auto inner_list : rhs) {\n");
    output.push_str(&format!(
        "          auto inner_vec = py::cast<std::vector<{ty}>>(inner_list);\n"
    ));
    output.push_str(&format!("          self.{path}->push_back(inner_vec);\n"));
    output.push_str("        }\n");
    output.push_str(&format!("    }}, {REFERENCE_INTERNAL});"));
    output
}

/// Setter that clears the vector, reserves, then appends each converted element.
fn refill_setter(owner: &Owner<'_>, name: &str, convert: &str) -> String {
    let native = &owner.native;
    let path = owner.path(name);

    let mut output = format!("    []({native}& self, py::object rhs) {{\n");
    output.push_str(&format!("        self.{path}->clear();\n"));
    output.push_str(&format!("        self.{path}->reserve(py::len(rhs));\n"));
    output.push_str("        for (auto val : rhs) {\n");
    output.push_str(&format!("          self.{path}->push_back({convert});\n"));
    output.push_str("        }\n");
    output.push_str(&format!("    }}, {REFERENCE_INTERNAL});"));
    output
}

/// `char` array exposed as a fixed-length byte buffer.
fn char_array_property(owner: &Owner<'_>, name: &str, extent: usize) -> String {
    let native = &owner.native;
    let path = owner.path(name);

    let mut output = property_head(owner, name);
    output.push_str(&format!("    []({native}& self) -> py::array_t<char> {{\n"));
    output.push_str(&format!("      return py::array_t<char>({extent}, self.{path});\n"));
    output.push_str("    },\n");
    output.push_str(&format!("    []({native}& self, py::object rhs) {{\n"));
    output.push_str("      int i = 0;\n");
    output.push_str("      for (auto val : rhs) {\n");
    output.push_str(&format!("        if (i == {extent}) {{\n"));
    output.push_str("          break;\n");
    output.push_str("        }\n");
    output.push_str(&format!("        self.{path}[i++] = py::cast<char>(val);\n"));
    output.push_str("      }\n");
    output.push_str(&format!("    }}, {REFERENCE_INTERNAL});"));
    output
}

/// Scalar array passed through a fixed-size vector wrapper.
fn fixed_array_property(owner: &Owner<'_>, name: &str, wrapper: &str, extent: usize) -> String {
    let native = &owner.native;
    let path = owner.path(name);
    let ty = format!("{wrapper}{extent}");

    let mut output = property_head(owner, name);
    output.push_str(&format!("    []({native}& self) -> {ty} {{\n"));
    output.push_str(&format!("        return {ty}(self.{path});\n"));
    output.push_str("    },\n");
    output.push_str(&format!("    []({native}& self, {wrapper}Ref{extent} {name}) {{\n"));
    output.push_str(&format!("        {ty}(self.{path}) = {name};\n"));
    output.push_str(&format!("    }}, {REFERENCE_INTERNAL});"));
    output
}

fn property_head(owner: &Owner<'_>, name: &str) -> String {
    format!("  {}.def_property(\n    \"{name}\",\n", owner.class)
}
