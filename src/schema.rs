//! Input AST for native module schemas.
//!
//! Mirrors the JSON emitted by the upstream interface parser. Every type
//! annotation is one closed enum so the mappers can match exhaustively;
//! the position-specific rules (what may appear as a parameter, a return
//! or a struct field) live in `mapper` and `collector`.

use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::error::{Error, Result};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// Top-level component name → module group.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub modules: BTreeMap<String, SchemaModule>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaModule {
    /// Declared order is kept; output order is decided later by sorting.
    #[serde(default)]
    pub native_modules: Option<IndexMap<String, NativeModule>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NativeModule {
    #[serde(default)]
    pub properties: Vec<MethodProperty>,
}

/// One method of a native module.
///
/// The method-level `optional` flag is accepted and ignored: optional methods
/// are declared like required ones.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodProperty {
    pub name: String,
    pub type_annotation: FunctionSignature,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionSignature {
    #[serde(default)]
    pub params: Vec<Param>,
    pub return_type_annotation: ReturnAnnotation,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Param {
    pub name: String,
    #[serde(default)]
    pub nullable: bool,
    pub type_annotation: TypeAnnotation,
}

/// Return annotations carry their own nullability next to the type tag.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReturnAnnotation {
    #[serde(default)]
    pub nullable: bool,
    #[serde(flatten)]
    pub annotation: TypeAnnotation,
}

/// A named field of a structured (object) annotation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectProperty {
    pub name: String,
    #[serde(default, alias = "nullable")]
    pub optional: bool,
    pub type_annotation: TypeAnnotation,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum TypeAnnotation {
    #[serde(rename = "ReservedFunctionValueTypeAnnotation")]
    Reserved { name: ReservedName },
    #[serde(rename = "StringTypeAnnotation")]
    String,
    #[serde(rename = "NumberTypeAnnotation")]
    Number,
    #[serde(rename = "FloatTypeAnnotation")]
    Float,
    #[serde(rename = "Int32TypeAnnotation")]
    Int32,
    #[serde(rename = "BooleanTypeAnnotation")]
    Boolean,
    #[serde(rename = "GenericObjectTypeAnnotation")]
    GenericObject,
    #[serde(rename = "TypeAliasTypeAnnotation")]
    TypeAlias {
        #[serde(default)]
        name: String,
    },
    #[serde(rename = "ArrayTypeAnnotation")]
    Array {
        #[serde(default, rename = "elementType")]
        element_type: Option<Box<TypeAnnotation>>,
    },
    #[serde(rename = "ObjectTypeAnnotation")]
    Object {
        #[serde(default)]
        properties: Vec<ObjectProperty>,
    },
    #[serde(rename = "FunctionTypeAnnotation")]
    Function,
    #[serde(rename = "VoidTypeAnnotation")]
    Void,
    #[serde(rename = "GenericPromiseTypeAnnotation")]
    Promise,
}

/// Names a `ReservedFunctionValueTypeAnnotation` may carry.
///
/// Unknown names are kept rather than rejected at load time so the mapper can
/// report them together with the parameter they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ReservedName {
    RootTag,
    Other(String),
}

impl From<String> for ReservedName {
    fn from(name: String) -> Self {
        match name.as_str() {
            "RootTag" => ReservedName::RootTag,
            _ => ReservedName::Other(name),
        }
    }
}

impl ReservedName {
    pub fn as_str(&self) -> &str {
        match self {
            ReservedName::RootTag => "RootTag",
            ReservedName::Other(name) => name,
        }
    }
}

impl TypeAnnotation {
    /// The tag this annotation has in the schema JSON.
    pub fn tag(&self) -> &'static str {
        match self {
            TypeAnnotation::Reserved { .. } => "ReservedFunctionValueTypeAnnotation",
            TypeAnnotation::String => "StringTypeAnnotation",
            TypeAnnotation::Number => "NumberTypeAnnotation",
            TypeAnnotation::Float => "FloatTypeAnnotation",
            TypeAnnotation::Int32 => "Int32TypeAnnotation",
            TypeAnnotation::Boolean => "BooleanTypeAnnotation",
            TypeAnnotation::GenericObject => "GenericObjectTypeAnnotation",
            TypeAnnotation::TypeAlias { .. } => "TypeAliasTypeAnnotation",
            TypeAnnotation::Array { .. } => "ArrayTypeAnnotation",
            TypeAnnotation::Object { .. } => "ObjectTypeAnnotation",
            TypeAnnotation::Function => "FunctionTypeAnnotation",
            TypeAnnotation::Void => "VoidTypeAnnotation",
            TypeAnnotation::Promise => "GenericPromiseTypeAnnotation",
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// FLATTENING & VALIDATION
// ————————————————————————————————————————————————————————————————————————————

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern compiles"));

fn check_identifier(kind: &'static str, name: &str) -> Result<()> {
    if IDENTIFIER.is_match(name) {
        Ok(())
    } else {
        Err(Error::InvalidIdentifier { kind, name: name.to_string() })
    }
}

impl Schema {
    /// Flattens every component's native modules into one name-sorted map.
    ///
    /// A module name declared by two components is a configuration error.
    pub fn native_modules(&self) -> Result<BTreeMap<&str, &NativeModule>> {
        let mut out = BTreeMap::new();
        let mut owners: BTreeMap<&str, &str> = BTreeMap::new();
        for (component, group) in &self.modules {
            let Some(modules) = &group.native_modules else {
                continue;
            };
            for (name, module) in modules {
                if let Some(first) = owners.get(name.as_str()) {
                    return Err(Error::DuplicateModule {
                        name: name.clone(),
                        first: first.to_string(),
                        second: component.clone(),
                    });
                }
                owners.insert(name, component);
                out.insert(name.as_str(), module);
            }
        }
        Ok(out)
    }

    /// Shape checks that must hold before translation starts.
    pub fn validate(&self) -> Result<()> {
        for (name, module) in self.native_modules()? {
            check_identifier("module", name)?;
            module.validate(name)?;
        }
        Ok(())
    }
}

impl NativeModule {
    fn validate(&self, module: &str) -> Result<()> {
        let mut methods = BTreeSet::new();
        for method in &self.properties {
            check_identifier("method", &method.name)?;
            if !methods.insert(method.name.as_str()) {
                return Err(Error::DuplicateMethod {
                    module: module.to_string(),
                    method: method.name.clone(),
                });
            }
            let mut params = BTreeSet::new();
            for param in &method.type_annotation.params {
                check_identifier("parameter", &param.name)?;
                if !params.insert(param.name.as_str()) {
                    return Err(Error::DuplicateParam {
                        module: module.to_string(),
                        method: method.name.clone(),
                        param: param.name.clone(),
                    });
                }
                check_field_names(&param.type_annotation)?;
            }
            check_field_names(&method.type_annotation.return_type_annotation.annotation)?;
        }
        Ok(())
    }
}

/// Field names become getter names and parts of struct names.
fn check_field_names(annotation: &TypeAnnotation) -> Result<()> {
    match annotation {
        TypeAnnotation::Object { properties } => properties.iter().try_for_each(|property| {
            check_identifier("field", &property.name)?;
            check_field_names(&property.type_annotation)
        }),
        TypeAnnotation::Array { element_type: Some(element) } => check_field_names(element),
        _ => Ok(()),
    }
}
