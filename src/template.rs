//! Output templates.
//!
//! Each template is a struct with one field per slot. Slots are written once
//! through `Display`, so generated text is never rescanned for placeholders.

use std::fmt;

use crate::render::native_namespace;

/// The whole generated header.
pub struct HeaderDocument<'a> {
    pub library_name: &'a str,
    /// Protocol blocks, one per module, in module-name order.
    pub protocols: &'a str,
    /// JSI module classes, one per module, in module-name order.
    pub modules: &'a str,
}

impl fmt::Display for HeaderDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `at` keeps the generated marker out of this source file
        write!(
            f,
            r#"
/**
 * Native module specs for library '{library}'.
 *
 * {at}generated by modulegen-objc
 */

#ifndef __cplusplus
#error This file must be compiled as Obj-C++. If you are importing it, you must change your file extension to .mm.
#endif

#import <vector>

#import <Foundation/Foundation.h>

#import <folly/Optional.h>

#import <RCTRequired/RCTRequired.h>
#import <RCTTypeSafety/RCTConvertHelpers.h>
#import <RCTTypeSafety/RCTTypedModuleConstants.h>

#import <React/RCTBridgeModule.h>
#import <React/RCTCxxConvert.h>
#import <React/RCTManagedPointer.h>

#import <ReactCommon/RCTTurboModule.h>

{protocols}

namespace facebook {{
  namespace react {{
{modules}
  }} // namespace react
}} // namespace facebook
"#,
            library = self.library_name,
            at = '@',
            protocols = self.protocols,
            modules = self.modules,
        )
    }
}

/// One module's struct declarations followed by its protocol.
pub struct ProtocolBlock<'a> {
    pub structs: &'a str,
    pub module_name: &'a str,
    pub methods: &'a str,
}

impl fmt::Display for ProtocolBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.structs)?;
        writeln!(f)?;
        writeln!(
            f,
            "@protocol {}Spec <RCTBridgeModule, RCTTurboModule>",
            native_namespace(self.module_name)
        )?;
        writeln!(f, "{}", self.methods)?;
        writeln!(f, "@end")
    }
}

/// The JSI class a module registers under.
pub struct ModuleClass<'a> {
    pub module_name: &'a str,
}

impl fmt::Display for ModuleClass<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.module_name;
        let class = format!("{}SpecJSI", native_namespace(name));
        writeln!(f, "    /**")?;
        writeln!(f, "    * ObjC++ class for module '{name}'")?;
        writeln!(f, "    */")?;
        writeln!(f, "    class JSI_EXPORT {class} : public ObjCTurboModule {{")?;
        writeln!(f, "    public:")?;
        writeln!(f, "      {class}(const ObjCTurboModule::InitParams &params);")?;
        write!(f, "    }};")
    }
}
