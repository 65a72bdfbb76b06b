//! Method signature building.
//!
//! Turns one schema method into its Objective-C protocol declaration, asking
//! the struct collector for structured parameters and returns and the mapper
//! for everything else.

use tracing::{debug, warn};

use crate::collector::StructCollector;
use crate::error::{Location, Result};
use crate::mapper;
use crate::render::{qualified_constants_name, qualified_struct_name};
use crate::schema::{MethodProperty, Param, ReturnAnnotation, TypeAnnotation};

/// Reserved method exposing a module's constants.
pub const CONSTANTS_METHOD: &str = "getConstants";

const ARG_SEPARATOR: &str = "\n   ";

/// Declaration text for `method`, or `None` when the method is dropped.
///
/// Structs the method introduces are registered on `collector`.
pub fn method_declaration(collector: &mut StructCollector, method: &MethodProperty) -> Result<Option<String>> {
    let signature = &method.type_annotation;
    if method.name == CONSTANTS_METHOD {
        return constants_declaration(collector, method);
    }

    let mut args = Vec::with_capacity(signature.params.len());
    for (index, param) in signature.params.iter().enumerate() {
        let objc_type = param_objc_type(collector, &method.name, param)?;
        let label = if index == 0 { "" } else { param.name.as_str() };
        args.push(format!("{label}:({objc_type}){}", param.name));
    }
    let mut args = args.join(ARG_SEPARATOR);

    let ret = &signature.return_type_annotation;
    if ret.annotation == TypeAnnotation::Promise {
        args.push_str(&promise_callbacks(!signature.params.is_empty()));
    }
    let return_type = return_objc_type(collector, &method.name, ret)?;

    debug!(module = collector.module(), method = %method.name, "built method declaration");
    Ok(Some(format!("- ({return_type}) {}{args};", method.name)))
}

/// Resolve/reject slots. The resolve slot is unlabeled when it is the first
/// argument and labeled after ordinary parameters.
fn promise_callbacks(has_params: bool) -> String {
    let resolve_label = if has_params { "\n   resolve" } else { "" };
    format!("{resolve_label}:(RCTPromiseResolveBlock)resolve{ARG_SEPARATOR}reject:(RCTPromiseRejectBlock)reject")
}

fn param_objc_type(collector: &mut StructCollector, method: &str, param: &Param) -> Result<String> {
    if let Some(name) = collector.collect_param(method, param)? {
        return Ok(format!("{}&", qualified_struct_name(collector.module(), &name)));
    }
    mapper::param_type(&param.type_annotation, param.nullable)
        .map(str::to_owned)
        .map_err(|unsupported| {
            unsupported.at(Location::Param {
                module: collector.module().to_string(),
                method: method.to_string(),
                param: param.name.clone(),
            })
        })
}

fn return_objc_type(collector: &mut StructCollector, method: &str, ret: &ReturnAnnotation) -> Result<String> {
    if let Some(name) = collector.collect_return(method, ret)? {
        let builder = format!("{}::Builder", qualified_struct_name(collector.module(), &name));
        return Ok(if ret.nullable { format!("folly::Optional<{builder}>") } else { builder });
    }
    mapper::return_type(ret).map(str::to_owned).map_err(|unsupported| {
        unsupported.at(Location::Return {
            module: collector.module().to_string(),
            method: method.to_string(),
        })
    })
}

fn constants_declaration(collector: &mut StructCollector, method: &MethodProperty) -> Result<Option<String>> {
    if let TypeAnnotation::Object { properties } = &method.type_annotation.return_type_annotation.annotation {
        if properties.is_empty() {
            warn!(module = collector.module(), "dropping getConstants with an empty return shape");
            return Ok(None);
        }
        collector.collect_constants(&method.name, properties)?;
    }
    let constants = format!(
        "facebook::react::ModuleConstants<{}::Builder>",
        qualified_constants_name(collector.module())
    );
    Ok(Some(format!("- ({constants})constantsToExport;\n- ({constants})getConstants;")))
}
