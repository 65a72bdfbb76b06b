//! Module and document assembly.

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::collector::StructCollector;
use crate::config::GenerateOptions;
use crate::error::Result;
use crate::render::{ObjCxxStructRenderer, StructRenderer};
use crate::schema::{NativeModule, Schema};
use crate::signature;
use crate::template::{HeaderDocument, ModuleClass, ProtocolBlock};

/// File name → file contents.
pub type GeneratedFiles = IndexMap<String, String>;

/// Generates the header with the default Objective-C++ struct renderer.
pub fn generate(schema: &Schema, options: &GenerateOptions) -> Result<GeneratedFiles> {
    generate_with(schema, options, &ObjCxxStructRenderer)
}

/// Generates the header, delegating struct declarations to `renderer`.
///
/// Modules are emitted in name order regardless of declaration order. The
/// first unsupported construct aborts the whole document.
pub fn generate_with(
    schema: &Schema,
    options: &GenerateOptions,
    renderer: &dyn StructRenderer,
) -> Result<GeneratedFiles> {
    schema.validate()?;
    let modules = schema.native_modules()?;

    let mut protocols = Vec::with_capacity(modules.len());
    let mut classes = Vec::with_capacity(modules.len());
    for (&name, module) in &modules {
        protocols.push(module_protocol(name, module, renderer)?);
        classes.push(ModuleClass { module_name: name }.to_string());
    }

    let document = HeaderDocument {
        library_name: &options.library_name,
        protocols: &protocols.join("\n"),
        modules: &classes.join("\n"),
    }
    .to_string();

    let file_name = options.file_name();
    info!(file = %file_name, modules = modules.len(), "generated module header");
    let mut files = GeneratedFiles::new();
    files.insert(file_name, document);
    Ok(files)
}

/// Struct declarations plus the protocol for one module.
pub fn module_protocol(name: &str, module: &NativeModule, renderer: &dyn StructRenderer) -> Result<String> {
    let mut collector = StructCollector::new(name);
    let mut methods = Vec::with_capacity(module.properties.len());
    for method in &module.properties {
        if let Some(declaration) = signature::method_declaration(&mut collector, method)? {
            methods.push(declaration);
        }
    }

    let collected = collector.finish();
    debug!(module = name, structs = collected.structs.len(), "collected structs");

    // structs nested in the constants shape are among `collected.structs`,
    // so they are declared ahead of `Constants`
    let mut rendered = vec![renderer.render(name, &collected.structs)?];
    if let Some(constants) = &collected.constants {
        rendered.push(renderer.render_constants(name, constants)?);
    }
    rendered.retain(|block| !block.is_empty());

    Ok(ProtocolBlock {
        structs: &rendered.join("\n"),
        module_name: name,
        methods: &methods.join("\n"),
    }
    .to_string())
}
