//! Struct synthesis.
//!
//! Finds anonymous structured annotations in a module's methods and gives each
//! one a deterministic name so it can be declared once and referenced from
//! method signatures. One collector is used per module and discarded after the
//! module is rendered.
//!
//! Naming:
//! - parameter struct: `Method` + `Param`
//! - return struct: `Method` + `ReturnType`
//! - structured field: parent name + `Field`
//! - array element: owner name + `Element`
//!
//! Capitalization only touches the first character. Method names are unique in
//! a module and parameter names unique in a method, so collisions only arise
//! from degenerate casing; those are reported instead of overwritten.

use indexmap::IndexMap;
use tracing::trace;

use crate::error::{Error, Location, Result};
use crate::mapper::Unsupported;
use crate::render::capitalize_first_letter;
use crate::schema::{ObjectProperty, Param, ReservedName, ReturnAnnotation, TypeAnnotation};

/// Base name used for structs nested inside the constants shape.
pub const CONSTANTS_STRUCT: &str = "Constants";

/// Which side of the bridge a struct is consumed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Read from JS values passed into a method.
    Param,
    /// Built natively and handed back to JS.
    Return,
}

/// A named struct extracted from a structured annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct StructDescriptor {
    pub name: String,
    pub position: Position,
    pub properties: Vec<ObjectProperty>,
    /// Method the struct was found in.
    pub method: String,
    /// Dotted path from the parameter (or `return`) to the annotation.
    pub origin: String,
}

pub fn param_struct_name(method: &str, param: &str) -> String {
    capitalize_first_letter(method) + &capitalize_first_letter(param)
}

pub fn return_struct_name(method: &str) -> String {
    capitalize_first_letter(method) + "ReturnType"
}

pub fn field_struct_name(parent: &str, field: &str) -> String {
    format!("{parent}{}", capitalize_first_letter(field))
}

pub fn element_struct_name(owner: &str) -> String {
    format!("{owner}Element")
}

/// Everything a module's methods contributed besides their signatures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleStructs {
    /// In registration order (parents before their nested structs).
    pub structs: Vec<StructDescriptor>,
    /// Fields of a non-empty `getConstants` return.
    pub constants: Option<Vec<ObjectProperty>>,
}

/// Per-module accumulator of struct descriptors.
#[derive(Debug)]
pub struct StructCollector {
    module: String,
    structs: IndexMap<String, StructDescriptor>,
    constants: Option<Vec<ObjectProperty>>,
}

impl StructCollector {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            structs: IndexMap::new(),
            constants: None,
        }
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    /// Registers the structs a parameter introduces.
    ///
    /// Returns the struct name when the parameter itself is structured. An
    /// array-of-structured parameter keeps its generic array type; its element
    /// struct is registered on the side and `None` is returned.
    pub fn collect_param(&mut self, method: &str, param: &Param) -> Result<Option<String>> {
        let name = param_struct_name(method, &param.name);
        match &param.type_annotation {
            TypeAnnotation::Object { properties } => {
                self.register(method, name.clone(), &param.name, Position::Param, properties)?;
                Ok(Some(name))
            }
            TypeAnnotation::Array { element_type: Some(element) } => {
                let origin = format!("{}[]", param.name);
                self.collect_nested(method, element_struct_name(&name), &origin, Position::Param, element)?;
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    /// Registers `<Method>ReturnType` when the return is structured.
    pub fn collect_return(&mut self, method: &str, ret: &ReturnAnnotation) -> Result<Option<String>> {
        let TypeAnnotation::Object { properties } = &ret.annotation else {
            return Ok(None);
        };
        let name = return_struct_name(method);
        self.register(method, name.clone(), "return", Position::Return, properties)?;
        Ok(Some(name))
    }

    /// Records the constants shape without registering a struct for it.
    /// Structured fields inside it are registered under the `Constants` base.
    pub fn collect_constants(&mut self, method: &str, properties: &[ObjectProperty]) -> Result<()> {
        self.collect_fields(method, CONSTANTS_STRUCT, "return", Position::Return, properties)?;
        self.constants = Some(properties.to_vec());
        Ok(())
    }

    pub fn finish(self) -> ModuleStructs {
        ModuleStructs {
            structs: self.structs.into_values().collect(),
            constants: self.constants,
        }
    }

    fn register(
        &mut self,
        method: &str,
        name: String,
        origin: &str,
        position: Position,
        properties: &[ObjectProperty],
    ) -> Result<()> {
        if self.structs.contains_key(&name) {
            return Err(Error::DuplicateStruct {
                module: self.module.clone(),
                name,
                origin: format!("{method}.{origin}"),
            });
        }
        trace!(module = %self.module, struct_name = %name, "registering struct");
        self.structs.insert(
            name.clone(),
            StructDescriptor {
                name: name.clone(),
                position,
                properties: properties.to_vec(),
                method: method.to_string(),
                origin: origin.to_string(),
            },
        );
        self.collect_fields(method, &name, origin, position, properties)
    }

    fn collect_fields(
        &mut self,
        method: &str,
        parent: &str,
        origin: &str,
        position: Position,
        properties: &[ObjectProperty],
    ) -> Result<()> {
        for property in properties {
            let path = format!("{origin}.{}", property.name);
            check_field(&property.type_annotation).map_err(|unsupported| {
                unsupported.at(Location::Field {
                    module: self.module.clone(),
                    method: method.to_string(),
                    path: path.clone(),
                })
            })?;
            let name = field_struct_name(parent, &property.name);
            self.collect_nested(method, name, &path, position, &property.type_annotation)?;
        }
        Ok(())
    }

    fn collect_nested(
        &mut self,
        method: &str,
        name: String,
        origin: &str,
        position: Position,
        annotation: &TypeAnnotation,
    ) -> Result<()> {
        match annotation {
            TypeAnnotation::Object { properties } => {
                self.register(method, name, origin, position, properties)
            }
            TypeAnnotation::Array { element_type: Some(element) } => {
                let origin = format!("{origin}[]");
                self.collect_nested(method, element_struct_name(&name), &origin, position, element)
            }
            _ => Ok(()),
        }
    }
}

/// Field annotations may not be callables or method-only tags.
fn check_field(annotation: &TypeAnnotation) -> std::result::Result<(), Unsupported> {
    match annotation {
        TypeAnnotation::Function | TypeAnnotation::Void | TypeAnnotation::Promise => {
            Err(Unsupported(annotation.tag().to_string()))
        }
        TypeAnnotation::Reserved { name: ReservedName::Other(other) } => Err(Unsupported(other.clone())),
        TypeAnnotation::Array { element_type: Some(element) } => check_field(element),
        _ => Ok(()),
    }
}
