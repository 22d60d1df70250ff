//! `add_*` constructor generation.
//!
//! Every manifest entry becomes a method on its parent that calls the native
//! `add` function and then assigns any keyword arguments the caller passed.
//! Keyword names are checked against the fields of the created struct before
//! anything is assigned.

use super::{Category, RAW_NAMESPACE, WRAPPED_HANDLE, describe, raw_type};
use crate::error::CodegenError;
use specbind_schema::ir::{Catalogue, FieldDecl, StructDef, to_pascal_case};
use specbind_schema::manifest::{ConstructorEntry, ConstructorManifest, ParentKind};
use specbind_schema::types::{FieldType, PointerTarget, ValueType};

const SET_STRING: &str = r#"    auto set_string = [&kwargs](const char* str, std::basic_string<char>* des) {
      if (kwargs.contains(str)) {
        try {
          *des = kwargs[str].cast<std::string>();
        } catch (const py::cast_error &e) {
          throw pybind11::value_error(std::string(str) + " should be a string.");
        }
      }
    };
"#;

const SET_VEC: &str = r#"    auto set_vec = [&kwargs](const char* str, auto&& des) {
      if (kwargs.contains(str)) {
        try {
          using T = typename std::decay_t<decltype(*des)>::value_type;
          std::vector<T> vec = kwargs[str].cast<std::vector<T>>();
          des->clear();
          des->reserve(vec.size());
          for (auto val : vec) {
            des->push_back(val);
          }
        } catch (const py::cast_error &e) {
          throw pybind11::value_error(std::string(str) + " has the wrong type.");
        }
      }
    };
"#;

const SET_ARRAY: &str = r#"    auto set_array = [&kwargs](const char* str, auto&& des, int size) {
      if (kwargs.contains(str)) {
        try {
          using T = std::remove_pointer_t<std::decay_t<decltype(des)>>;
          std::vector<T> array = kwargs[str].cast<std::vector<T>>();
          if (array.size() != size) {
            throw pybind11::value_error(std::string(str) + " should be a list/array of size " + std::to_string(size) + ".");
          }
          int idx = 0;
          for (auto val : array) {
            des[idx++] = val;
          }
        } catch (const py::cast_error &e) {
          throw pybind11::value_error(std::string(str) + " should be a list/array.");
        }
      }
    };
"#;

const SET_VALUE: &str = r#"    auto set_value = [&kwargs](const char* str, auto&& des) {
      if (kwargs.contains(str)) {
        try {
          using T = std::decay_t<decltype(des)>;
          des = kwargs[str].cast<T>();
        } catch (const py::cast_error &e) {
          throw pybind11::value_error(std::string(str) + " is the wrong type.");
        }
      }
    };
"#;

/// Keyword-assignable field of a constructed struct.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Assignment<'f> {
    name: &'f str,
    category: Category,
    extent: Option<usize>,
}

impl Assignment<'_> {
    fn line(&self) -> String {
        let setter = self.category.setter();
        let name = self.name;
        match self.extent {
            Some(extent) => format!("    {setter}(\"{name}\", out->{name}, {extent});\n"),
            None => format!("    {setter}(\"{name}\", out->{name});\n"),
        }
    }
}

/// Generates keyword-argument constructors for manifest entries.
pub struct ConstructorSynthesizer<'a> {
    catalogue: &'a Catalogue,
}

impl<'a> ConstructorSynthesizer<'a> {
    /// Creates a new constructor synthesizer.
    #[must_use]
    pub fn new(catalogue: &'a Catalogue) -> Self {
        Self { catalogue }
    }

    /// Generates the constructor section, one fragment per entry in order.
    ///
    /// # Errors
    /// Returns `CodegenError::UnknownStruct` if an entry names a struct the
    /// catalogue does not define.
    pub fn generate(&self, manifest: &ConstructorManifest) -> Result<String, CodegenError> {
        let mut output = String::new();
        for entry in manifest.iter() {
            output.push_str(&self.synthesize(entry)?);
        }
        Ok(output)
    }

    /// Generates the constructor for a single manifest entry.
    ///
    /// # Errors
    /// Returns `CodegenError::UnknownStruct` if the entry's struct is missing.
    pub fn synthesize(&self, entry: &ConstructorEntry) -> Result<String, CodegenError> {
        let def = self
            .catalogue
            .get_struct(&entry.name)
            .ok_or_else(|| CodegenError::UnknownStruct {
                name: entry.name.clone(),
            })?;

        let assignments: Vec<Assignment<'_>> = def
            .fields
            .iter()
            .filter_map(|field| assignment(def, field))
            .collect();

        tracing::debug!(
            name = %entry.name,
            parent = ?entry.parent,
            kwargs = assignments.len(),
            "synthesizing constructor"
        );

        let mut output = String::from("\n");
        output.push_str(&self.signature(entry));
        output.push_str(&keyword_check(&assignments));

        let mut seen: Vec<Category> = Vec::new();
        for a in &assignments {
            if !seen.contains(&a.category) {
                seen.push(a.category);
                output.push_str(helper(a.category));
            }
        }

        for a in &assignments {
            output.push_str(&a.line());
        }

        output.push_str("    return out;\n");
        output.push_str("  },\n");
        if entry.has_default {
            output.push_str("  py::arg_v(\"default\", nullptr),\n");
        }
        output.push_str("  py::return_value_policy::reference_internal);\n");

        Ok(output)
    }

    /// Method header and native `add` call.
    fn signature(&self, entry: &ConstructorEntry) -> String {
        let scope = &self.catalogue.scope;
        let stem = scope.element_stem(&entry.name);
        let method = format!("add_{}", stem.to_lowercase());
        let add_fn = format!("{}_add{stem}", scope.prefix);
        let ret = raw_type(&entry.name);

        match entry.parent {
            ParentKind::Spec => {
                let class = &scope.root;
                let native = to_pascal_case(&scope.root);
                if entry.has_default {
                    let default_ty = default_type(&scope.prefix);
                    let mut output = format!("  {class}.def(\"{method}\", []({native}& self,\n");
                    output.push_str(&format!(
                        "    {default_ty}* default_, py::kwargs kwargs) -> {ret}* {{\n"
                    ));
                    output.push_str(&format!(
                        "    auto out = {add_fn}(self.{WRAPPED_HANDLE}, default_);\n"
                    ));
                    output
                } else {
                    let mut output = format!(
                        "  {class}.def(\"{method}\", []({native}& self, py::kwargs kwargs) -> {ret}* {{\n"
                    );
                    output.push_str(&format!("    auto out = {add_fn}(self.{WRAPPED_HANDLE});\n"));
                    output
                }
            }
            ParentKind::Body { parent_frame } => {
                let class = &scope.body;
                let native = raw_type(&scope.body);
                let (arg_ty, arg) = if parent_frame {
                    (raw_type(&entry.name), "parentframe_")
                } else {
                    (default_type(&scope.prefix), "default_")
                };
                let mut output = format!("  {class}.def(\"{method}\", []({native}& self,\n");
                output.push_str(&format!(
                    "    {arg_ty}* {arg}, py::kwargs kwargs) -> {ret}* {{\n"
                ));
                output.push_str(&format!("    auto out = {add_fn}(&self, {arg});\n"));
                output
            }
        }
    }
}

/// Raw type of the default class, e.g. `raw::MjsDefault`.
fn default_type(prefix: &str) -> String {
    format!("{RAW_NAMESPACE}::{}Default", to_pascal_case(prefix))
}

/// Selects how a field is assigned from keyword arguments.
fn assignment<'f>(owner: &StructDef, field: &'f FieldDecl) -> Option<Assignment<'f>> {
    let name = field.name.as_str();
    let plain = |category| {
        Some(Assignment {
            name,
            category,
            extent: None,
        })
    };

    match &field.ty {
        FieldType::Pointer(PointerTarget::Element(_)) => None,
        FieldType::Pointer(PointerTarget::String) => plain(Category::String),
        FieldType::Pointer(PointerTarget::Vector(_)) => plain(Category::Vector),
        FieldType::Pointer(PointerTarget::Struct(_) | PointerTarget::Native(_)) => {
            tracing::warn!(
                owner = %owner.name,
                field = %field.name,
                shape = %describe(&field.ty),
                "field not assignable by keyword, skipping"
            );
            None
        }
        FieldType::Value(ValueType::Struct(r)) if r.inline => {
            tracing::debug!(owner = %owner.name, field = %field.name, "embedded struct skipped");
            None
        }
        FieldType::Value(_) => plain(Category::Value),
        FieldType::Array { element, extents } => match (element, extents.as_slice()) {
            (ValueType::Scalar(_) | ValueType::Char, [extent]) => Some(Assignment {
                name,
                category: Category::Array,
                extent: Some(*extent),
            }),
            _ => {
                tracing::warn!(
                    owner = %owner.name,
                    field = %field.name,
                    shape = %describe(&field.ty),
                    "field not assignable by keyword, skipping"
                );
                None
            }
        },
    }
}

/// Keyword allow-set and the loop rejecting unknown keywords.
fn keyword_check(assignments: &[Assignment<'_>]) -> String {
    let quoted: Vec<String> = assignments.iter().map(|a| format!("\"{}\"", a.name)).collect();
    let listed: Vec<&str> = assignments.iter().map(|a| a.name).collect();

    let mut output = format!(
        "    std::set<std::string> valid_kwargs = {{{}}};\n",
        quoted.join(", ")
    );
    output.push_str("    py::dict kwarg_dict = kwargs;\n");
    output.push_str("    for (auto item: kwarg_dict) {\n");
    output.push_str("      std::string key = py::str(item.first);\n");
    output.push_str("      if (valid_kwargs.count(key) == 0) {\n");
    output.push_str(&format!(
        "        throw pybind11::type_error(\"Invalid '\" + key + \"' keyword argument. Valid options are: {}.\");\n",
        listed.join(", ")
    ));
    output.push_str("      }\n");
    output.push_str("    }\n");
    output
}

const fn helper(category: Category) -> &'static str {
    match category {
        Category::String => SET_STRING,
        Category::Vector => SET_VEC,
        Category::Array => SET_ARRAY,
        Category::Value => SET_VALUE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use specbind_schema::types::{NumericType, ScalarType, Scope, StructRef, VectorKind};

    fn catalogue_with(def: StructDef) -> Catalogue {
        let mut catalogue = Catalogue::new(Scope::default());
        catalogue.add_struct(def);
        catalogue
    }

    fn synthesize(def: StructDef, entry: ConstructorEntry) -> String {
        let catalogue = catalogue_with(def);
        ConstructorSynthesizer::new(&catalogue)
            .synthesize(&entry)
            .expect("synthesizes")
    }

    #[test]
    fn test_allow_set_excludes_skipped_fields() {
        let def = StructDef::new("mjsWidget")
            .with_field(
                "a",
                FieldType::Pointer(PointerTarget::Element("mjsElement".into())),
            )
            .with_field("b", FieldType::Value(ValueType::Scalar(ScalarType::Int)))
            .with_field("c", FieldType::Pointer(PointerTarget::String));
        let code = synthesize(def, ConstructorEntry::spec("mjsWidget", false));

        assert!(code.contains("std::set<std::string> valid_kwargs = {\"b\", \"c\"};"));
        assert!(code.contains("Valid options are: b, c.\");"));
        assert!(code.contains("set_value(\"b\", out->b);"));
        assert!(code.contains("set_string(\"c\", out->c);"));
        assert!(!code.contains("out->a"));
    }

    #[test]
    fn test_helper_emitted_once_per_category() {
        let def = StructDef::new("mjsMesh")
            .with_field(
                "uservert",
                FieldType::Pointer(PointerTarget::Vector(VectorKind::Numeric(
                    NumericType::Float,
                ))),
            )
            .with_field(
                "userface",
                FieldType::Pointer(PointerTarget::Vector(VectorKind::Numeric(NumericType::Int))),
            )
            .with_field("userdata", FieldType::Pointer(PointerTarget::Vector(VectorKind::Byte)));
        let code = synthesize(def, ConstructorEntry::spec("mjsMesh", true));

        assert_eq!(code.matches("auto set_vec = ").count(), 1);
        assert_eq!(code.matches("    set_vec(\"").count(), 3);
        assert!(!code.contains("auto set_value"));
    }

    #[test]
    fn test_helpers_follow_first_appearance() {
        let def = StructDef::new("mjsSite")
            .with_field(
                "size",
                FieldType::Array {
                    element: ValueType::Scalar(ScalarType::Double),
                    extents: vec![3],
                },
            )
            .with_field("group", FieldType::Value(ValueType::Scalar(ScalarType::Int)))
            .with_field("name", FieldType::Pointer(PointerTarget::String));
        let code = synthesize(def, ConstructorEntry::body("mjsSite"));

        let array = code.find("auto set_array").expect("array helper");
        let value = code.find("auto set_value").expect("value helper");
        let string = code.find("auto set_string").expect("string helper");
        assert!(array < value && value < string);
        assert!(code.contains("set_array(\"size\", out->size, 3);"));
    }

    #[test]
    fn test_spec_signature_with_default() {
        let code = synthesize(
            StructDef::new("mjsMaterial"),
            ConstructorEntry::spec("mjsMaterial", true),
        );

        assert!(code.contains("  mjSpec.def(\"add_material\", [](MjSpec& self,\n"));
        assert!(code.contains("raw::MjsDefault* default_, py::kwargs kwargs) -> raw::MjsMaterial* {"));
        assert!(code.contains("auto out = mjs_addMaterial(self.ptr, default_);"));
        assert!(code.contains("py::arg_v(\"default\", nullptr),"));
        assert!(code.ends_with("  py::return_value_policy::reference_internal);\n"));
    }

    #[test]
    fn test_spec_signature_without_default() {
        let code = synthesize(
            StructDef::new("mjsHField"),
            ConstructorEntry::spec("mjsHField", false),
        );

        assert!(code.contains(
            "mjSpec.def(\"add_hfield\", [](MjSpec& self, py::kwargs kwargs) -> raw::MjsHField* {"
        ));
        assert!(code.contains("auto out = mjs_addHField(self.ptr);"));
        assert!(!code.contains("default_"));
        assert!(!code.contains("py::arg_v"));
    }

    #[test]
    fn test_body_signature() {
        let code = synthesize(StructDef::new("mjsGeom"), ConstructorEntry::body("mjsGeom"));

        assert!(code.contains("  mjsBody.def(\"add_geom\", [](raw::MjsBody& self,\n"));
        assert!(code.contains("auto out = mjs_addGeom(&self, default_);"));
        assert!(code.contains("py::arg_v(\"default\", nullptr),"));
    }

    #[test]
    fn test_frame_signature() {
        let entry = ConstructorEntry::new(
            "mjsFrame",
            ParentKind::Body { parent_frame: true },
            true,
        );
        let code = synthesize(StructDef::new("mjsFrame"), entry);

        assert!(code.contains("raw::MjsFrame* parentframe_, py::kwargs kwargs) -> raw::MjsFrame* {"));
        assert!(code.contains("auto out = mjs_addFrame(&self, parentframe_);"));
    }

    #[test]
    fn test_unassignable_fields_skipped() {
        let def = StructDef::new("mjsBody")
            .with_field(
                "alt",
                FieldType::Value(ValueType::Struct(StructRef::inline("mjsOrientation"))),
            )
            .with_field(
                "plugin",
                FieldType::Pointer(PointerTarget::Struct(StructRef::new("mjsPlugin"))),
            )
            .with_field(
                "grid",
                FieldType::Array {
                    element: ValueType::Scalar(ScalarType::Int),
                    extents: vec![2, 2],
                },
            )
            .with_field("mass", FieldType::Value(ValueType::Scalar(ScalarType::Double)));
        let code = synthesize(def, ConstructorEntry::body("mjsBody"));

        assert!(code.contains("valid_kwargs = {\"mass\"};"));
        assert!(!code.contains("out->alt"));
        assert!(!code.contains("out->plugin"));
        assert!(!code.contains("out->grid"));
    }

    #[test]
    fn test_no_fields_has_no_helpers() {
        let code = synthesize(
            StructDef::new("mjsExclude"),
            ConstructorEntry::spec("mjsExclude", false),
        );

        assert!(code.contains("valid_kwargs = {};"));
        assert!(code.contains("Valid options are: .\");"));
        assert!(!code.contains("auto set_"));
    }

    #[test]
    fn test_unknown_struct() {
        let catalogue = Catalogue::new(Scope::default());
        let result = ConstructorSynthesizer::new(&catalogue)
            .synthesize(&ConstructorEntry::spec("mjsMissing", false));
        assert!(matches!(
            result,
            Err(CodegenError::UnknownStruct { ref name }) if name == "mjsMissing"
        ));
    }

    #[test]
    fn test_generate_preserves_manifest_order() {
        let mut catalogue = Catalogue::new(Scope::default());
        catalogue.add_struct(StructDef::new("mjsKey"));
        catalogue.add_struct(StructDef::new("mjsSite"));

        let manifest: ConstructorManifest = [
            ConstructorEntry::body("mjsSite"),
            ConstructorEntry::spec("mjsKey", false),
        ]
        .into_iter()
        .collect();

        let code = ConstructorSynthesizer::new(&catalogue)
            .generate(&manifest)
            .expect("generates");
        let site = code.find("add_site").expect("site");
        let key = code.find("add_key").expect("key");
        assert!(site < key);
    }
}
