//! Struct rendering: descriptors → nested Objective-C++ declarations.
//!
//! This module is the authority on emitted type names. Signatures reference
//! structs through [`qualified_struct_name`], and the renderer declares them
//! under the same name.

use tracing::debug;

use crate::collector::{element_struct_name, field_struct_name, Position, StructDescriptor, CONSTANTS_STRUCT};
use crate::error::{Location, Result};
use crate::mapper::Unsupported;
use crate::schema::{ObjectProperty, ReservedName, TypeAnnotation};

// ————————————————————————————————————————————————————————————————————————————
// NAMING
// ————————————————————————————————————————————————————————————————————————————

/// Uppercases the first character and leaves the rest untouched.
pub fn capitalize_first_letter(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn native_namespace(module: &str) -> String {
    format!("Native{module}")
}

/// `JS::Native<Module>::Spec<Name>`
pub fn qualified_struct_name(module: &str, name: &str) -> String {
    format!("JS::{}::Spec{name}", native_namespace(module))
}

/// `JS::Native<Module>::Constants`
pub fn qualified_constants_name(module: &str) -> String {
    format!("JS::{}::{CONSTANTS_STRUCT}", native_namespace(module))
}

// ————————————————————————————————————————————————————————————————————————————
// RENDERER
// ————————————————————————————————————————————————————————————————————————————

pub trait StructRenderer {
    /// Renders every descriptor of one module.
    fn render(&self, module: &str, structs: &[StructDescriptor]) -> Result<String>;

    /// Renders the module's constants shape.
    fn render_constants(&self, module: &str, properties: &[ObjectProperty]) -> Result<String> {
        let _ = (module, properties);
        Ok(String::new())
    }
}

/// Emits accessor structs for parameter-side shapes and builder structs for
/// return-side shapes, followed by their inline definitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjCxxStructRenderer;

impl StructRenderer for ObjCxxStructRenderer {
    fn render(&self, module: &str, structs: &[StructDescriptor]) -> Result<String> {
        if structs.is_empty() {
            return Ok(String::new());
        }
        debug!(module, count = structs.len(), "rendering structs");

        let mut declarations = Vec::with_capacity(structs.len());
        let mut conversions = Vec::new();
        let mut definitions = Vec::with_capacity(structs.len());

        // nested structs must be declared before the structs that use them
        for descriptor in structs.iter().rev() {
            let fields = FieldContext::for_struct(module, descriptor);
            let local = format!("Spec{}", descriptor.name);
            let qualified = qualified_struct_name(module, &descriptor.name);
            match descriptor.position {
                Position::Param => {
                    declarations.push(accessor_declaration(&local, &descriptor.properties, &fields)?);
                    conversions.push(cxx_convert_category(module, &local));
                    definitions.push(accessor_definitions(&qualified, &descriptor.properties, &fields)?);
                }
                Position::Return => {
                    declarations.push(builder_declaration(&local, &descriptor.properties, &fields)?);
                    definitions.push(builder_definitions(&qualified, &local, &descriptor.properties, &fields)?);
                }
            }
        }

        let mut out = wrap_namespace(module, &declarations.join("\n"));
        for conversion in conversions {
            out.push('\n');
            out.push_str(&conversion);
        }
        for definition in definitions {
            out.push('\n');
            out.push_str(&definition);
        }
        Ok(out)
    }

    fn render_constants(&self, module: &str, properties: &[ObjectProperty]) -> Result<String> {
        let fields = FieldContext {
            module,
            method: crate::signature::CONSTANTS_METHOD,
            parent: CONSTANTS_STRUCT.to_string(),
            origin: "return".to_string(),
        };
        let declaration = builder_declaration(CONSTANTS_STRUCT, properties, &fields)?;
        let qualified = qualified_constants_name(module);
        let definitions = builder_definitions(&qualified, CONSTANTS_STRUCT, properties, &fields)?;
        Ok(format!("{}\n{definitions}", wrap_namespace(module, &declaration)))
    }
}

// ————————————————————————————————————————————————————————————————————————————
// FIELD TYPES
// ————————————————————————————————————————————————————————————————————————————

/// What a struct's fields need to resolve nested names and report errors.
struct FieldContext<'a> {
    module: &'a str,
    method: &'a str,
    parent: String,
    origin: String,
}

impl<'a> FieldContext<'a> {
    fn for_struct(module: &'a str, descriptor: &'a StructDescriptor) -> Self {
        Self {
            module,
            method: &descriptor.method,
            parent: descriptor.name.clone(),
            origin: descriptor.origin.clone(),
        }
    }

    /// Name the collector gave a structured field (before any `Element` suffix).
    fn base(&self, property: &ObjectProperty) -> String {
        field_struct_name(&self.parent, &property.name)
    }

    fn unsupported(&self, property: &ObjectProperty, unsupported: Unsupported) -> crate::error::Error {
        unsupported.at(Location::Field {
            module: self.module.to_string(),
            method: self.method.to_string(),
            path: format!("{}.{}", self.origin, property.name),
        })
    }
}

type TypeResult = std::result::Result<String, Unsupported>;

fn unsupported(annotation: &TypeAnnotation) -> Unsupported {
    match annotation {
        TypeAnnotation::Reserved { name } => Unsupported(name.as_str().to_string()),
        _ => Unsupported(annotation.tag().to_string()),
    }
}

/// Object pointers are nullable on their own; everything else needs wrapping.
fn is_object_pointer(annotation: &TypeAnnotation) -> bool {
    matches!(
        annotation,
        TypeAnnotation::String | TypeAnnotation::GenericObject | TypeAnnotation::TypeAlias { .. }
    )
}

fn is_numeric(annotation: &TypeAnnotation) -> bool {
    matches!(
        annotation,
        TypeAnnotation::Number
            | TypeAnnotation::Float
            | TypeAnnotation::Int32
            | TypeAnnotation::Reserved { name: ReservedName::RootTag }
    )
}

/// Getter type for a value read from JS.
fn read_type(module: &str, base: &str, annotation: &TypeAnnotation) -> TypeResult {
    Ok(match annotation {
        _ if is_numeric(annotation) => "double".into(),
        TypeAnnotation::Boolean => "bool".into(),
        TypeAnnotation::String => "NSString *".into(),
        TypeAnnotation::GenericObject | TypeAnnotation::TypeAlias { .. } => "id<NSObject>".into(),
        TypeAnnotation::Array { element_type } => {
            let element = match element_type {
                Some(element) => read_type(module, &element_struct_name(base), element)?,
                None => "id<NSObject>".into(),
            };
            format!("facebook::react::LazyVector<{element}>")
        }
        TypeAnnotation::Object { .. } => qualified_struct_name(module, base),
        _ => return Err(unsupported(annotation)),
    })
}

fn optional_read_type(module: &str, base: &str, annotation: &TypeAnnotation) -> TypeResult {
    let inner = read_type(module, base, annotation)?;
    Ok(match annotation {
        TypeAnnotation::String => inner,
        TypeAnnotation::GenericObject | TypeAnnotation::TypeAlias { .. } => format!("{inner} _Nullable"),
        _ => format!("folly::Optional<{inner}>"),
    })
}

/// Expression converting the JS value `value` into the getter's type.
fn read_conversion(module: &str, base: &str, annotation: &TypeAnnotation, optional: bool, value: &str) -> TypeResult {
    let opt = if optional { "Optional" } else { "" };
    Ok(match annotation {
        _ if is_numeric(annotation) => format!("RCTBridgingTo{opt}Double({value})"),
        TypeAnnotation::Boolean => format!("RCTBridgingTo{opt}Bool({value})"),
        TypeAnnotation::String => format!("RCTBridgingTo{opt}String({value})"),
        TypeAnnotation::GenericObject | TypeAnnotation::TypeAlias { .. } => format!("(id<NSObject>){value}"),
        TypeAnnotation::Array { element_type } => {
            let element_base = element_struct_name(base);
            let (element, convert) = match element_type {
                Some(element) => (
                    read_type(module, &element_base, element)?,
                    read_conversion(module, &element_base, element, false, "itemValue_")?,
                ),
                None => ("id<NSObject>".into(), "itemValue_".into()),
            };
            format!("RCTBridgingTo{opt}Vec({value}, ^{element}(id itemValue_) {{ return {convert}; }})")
        }
        TypeAnnotation::Object { .. } => {
            let name = qualified_struct_name(module, base);
            if optional {
                format!("({value} == nil ? folly::none : folly::make_optional({name}({value})))")
            } else {
                format!("{name}({value})")
            }
        }
        _ => return Err(unsupported(annotation)),
    })
}

/// Value type stored in a builder's `Input`.
fn build_type(module: &str, base: &str, annotation: &TypeAnnotation) -> TypeResult {
    Ok(match annotation {
        _ if is_numeric(annotation) => "double".into(),
        TypeAnnotation::Boolean => "bool".into(),
        TypeAnnotation::String => "NSString *".into(),
        TypeAnnotation::GenericObject | TypeAnnotation::TypeAlias { .. } => "id<NSObject>".into(),
        TypeAnnotation::Array { element_type } => {
            let element = match element_type {
                Some(element) => build_type(module, &element_struct_name(base), element)?,
                None => "id<NSObject>".into(),
            };
            format!("std::vector<{element}>")
        }
        TypeAnnotation::Object { .. } => format!("{}::Builder", qualified_struct_name(module, base)),
        _ => return Err(unsupported(annotation)),
    })
}

fn input_field_type(module: &str, base: &str, property: &ObjectProperty) -> TypeResult {
    let annotation = &property.type_annotation;
    let inner = build_type(module, base, annotation)?;
    Ok(match (property.optional, is_object_pointer(annotation)) {
        (false, _) => format!("RCTRequired<{inner}>"),
        (true, true) if matches!(annotation, TypeAnnotation::String) => inner,
        (true, true) => format!("{inner} _Nullable"),
        (true, false) => format!("folly::Optional<{inner}>"),
    })
}

/// Expression converting a builder value into an `id` for the dictionary.
fn build_conversion(module: &str, base: &str, annotation: &TypeAnnotation, value: &str) -> TypeResult {
    Ok(match annotation {
        _ if is_numeric(annotation) => format!("@({value})"),
        TypeAnnotation::Boolean => format!("@({value})"),
        TypeAnnotation::String | TypeAnnotation::GenericObject | TypeAnnotation::TypeAlias { .. } => {
            value.to_string()
        }
        TypeAnnotation::Array { element_type } => {
            let element_base = element_struct_name(base);
            let (element, convert) = match element_type {
                Some(element) => (
                    build_type(module, &element_base, element)?,
                    build_conversion(module, &element_base, element, "el_")?,
                ),
                None => ("id<NSObject>".into(), "el_".into()),
            };
            format!("RCTConvertVecToArray({value}, ^id({element} el_) {{ return {convert}; }})")
        }
        TypeAnnotation::Object { .. } => format!("{value}.buildUnsafeRawValue()"),
        _ => return Err(unsupported(annotation)),
    })
}

// ————————————————————————————————————————————————————————————————————————————
// DECLARATIONS
// ————————————————————————————————————————————————————————————————————————————

fn wrap_namespace(module: &str, body: &str) -> String {
    let namespace = native_namespace(module);
    format!("namespace JS {{\n  namespace {namespace} {{\n{body}  }} // namespace {namespace}\n}} // namespace JS\n")
}

fn accessor_declaration(local: &str, properties: &[ObjectProperty], fields: &FieldContext<'_>) -> Result<String> {
    let mut out = format!("    struct {local} {{\n");
    for property in properties {
        let base = fields.base(property);
        let ty = if property.optional {
            optional_read_type(fields.module, &base, &property.type_annotation)
        } else {
            read_type(fields.module, &base, &property.type_annotation)
        }
        .map_err(|u| fields.unsupported(property, u))?;
        out.push_str(&format!("      {ty} {}() const;\n", property.name));
    }
    if !properties.is_empty() {
        out.push('\n');
    }
    out.push_str(&format!("      {local}(NSDictionary *const v) : _v(v) {{}}\n"));
    out.push_str("    private:\n");
    out.push_str("      NSDictionary *_v;\n");
    out.push_str("    };\n");
    Ok(out)
}

fn cxx_convert_category(module: &str, local: &str) -> String {
    let namespace = native_namespace(module);
    format!(
        "@interface RCTCxxConvert ({namespace}_{local})\n+ (RCTManagedPointer *)JS_{namespace}_{local}:(id)json;\n@end\n"
    )
}

fn accessor_definitions(qualified: &str, properties: &[ObjectProperty], fields: &FieldContext<'_>) -> Result<String> {
    let mut out = String::new();
    for property in properties {
        let base = fields.base(property);
        let annotation = &property.type_annotation;
        let (ty, convert) = if property.optional {
            (
                optional_read_type(fields.module, &base, annotation),
                read_conversion(fields.module, &base, annotation, true, "p"),
            )
        } else {
            (
                read_type(fields.module, &base, annotation),
                read_conversion(fields.module, &base, annotation, false, "p"),
            )
        };
        let ty = ty.map_err(|u| fields.unsupported(property, u))?;
        let convert = convert.map_err(|u| fields.unsupported(property, u))?;
        out.push_str(&format!(
            "inline {ty} {qualified}::{name}() const\n{{\n  id const p = _v[@\"{name}\"];\n  return {convert};\n}}\n",
            name = property.name
        ));
    }
    Ok(out)
}

fn builder_declaration(local: &str, properties: &[ObjectProperty], fields: &FieldContext<'_>) -> Result<String> {
    let mut out = format!("    struct {local} {{\n\n");
    out.push_str("      struct Builder {\n");
    out.push_str("        struct Input {\n");
    for property in properties {
        let base = fields.base(property);
        let ty = input_field_type(fields.module, &base, property).map_err(|u| fields.unsupported(property, u))?;
        out.push_str(&format!("          {ty} {};\n", property.name));
    }
    out.push_str("        };\n\n");
    out.push_str("        /** Initialize with a set of values */\n");
    out.push_str("        Builder(const Input i);\n");
    out.push_str(&format!("        /** Initialize with an existing {local} */\n"));
    out.push_str(&format!("        Builder({local} i);\n"));
    out.push_str("        /** Builds the object. Generally used only by the infrastructure. */\n");
    out.push_str("        NSDictionary *buildUnsafeRawValue() const { return _factory(); };\n");
    out.push_str("      private:\n");
    out.push_str("        NSDictionary *(^_factory)(void);\n");
    out.push_str("      };\n\n");
    out.push_str(&format!(
        "      static {local} fromUnsafeRawValue(NSDictionary *const v) {{ return {{v}}; }}\n"
    ));
    out.push_str("      NSDictionary *unsafeRawValue() const { return _v; }\n");
    out.push_str("    private:\n");
    out.push_str(&format!("      {local}(NSDictionary *const v) : _v(v) {{}}\n"));
    out.push_str("      NSDictionary *_v;\n");
    out.push_str("    };\n");
    Ok(out)
}

fn builder_definitions(
    qualified: &str,
    local: &str,
    properties: &[ObjectProperty],
    fields: &FieldContext<'_>,
) -> Result<String> {
    let mut out = format!("inline {qualified}::Builder::Builder(const Input i) : _factory(^{{\n");
    out.push_str("  NSMutableDictionary *d = [NSMutableDictionary new];\n");
    for property in properties {
        let base = fields.base(property);
        let annotation = &property.type_annotation;
        let name = &property.name;
        let line = match (property.optional, is_object_pointer(annotation)) {
            (false, _) => {
                let convert = build_conversion(fields.module, &base, annotation, name)
                    .map_err(|u| fields.unsupported(property, u))?;
                format!("  auto {name} = i.{name}.get();\n  d[@\"{name}\"] = {convert};\n")
            }
            (true, true) => format!("  d[@\"{name}\"] = i.{name};\n"),
            (true, false) => {
                let value = format!("i.{name}.value()");
                let convert = build_conversion(fields.module, &base, annotation, &value)
                    .map_err(|u| fields.unsupported(property, u))?;
                format!("  d[@\"{name}\"] = i.{name}.hasValue() ? {convert} : nil;\n")
            }
        };
        out.push_str(&line);
    }
    out.push_str("  return d;\n");
    out.push_str("}) {}\n");
    out.push_str(&format!("inline {qualified}::Builder::Builder({local} i) : _factory(^{{\n"));
    out.push_str("  return i.unsafeRawValue();\n");
    out.push_str("}) {}\n");
    Ok(out)
}
