use modulegen_objc::{generate, path_de, Error, GenerateOptions, Location, Schema};
use pretty_assertions::assert_eq;
use regex::Regex;
use serde_json::{json, Value};

fn schema(value: Value) -> Schema {
    serde_json::from_value(value).unwrap()
}

fn module(properties: Value) -> Value {
    json!({ "properties": properties })
}

fn method(name: &str, params: Value, ret: Value) -> Value {
    json!({
        "name": name,
        "optional": false,
        "typeAnnotation": { "type": "FunctionTypeAnnotation", "params": params, "returnTypeAnnotation": ret }
    })
}

fn header(schema: &Schema) -> String {
    let files = generate(schema, &GenerateOptions::new("TestSpec")).unwrap();
    files["TestSpec.h"].clone()
}

fn sample_schema() -> Schema {
    let bytes = std::fs::read(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/dev-test-runner/fixtures/SampleTurboModule.json"
    ))
    .unwrap();
    path_de::schema_from_slice(&bytes).unwrap()
}

#[test]
fn minimal_document() {
    let schema = schema(json!({
        "modules": { "Sample": { "nativeModules": {
            "Sample": module(json!([method("reload", json!([]), json!({ "type": "VoidTypeAnnotation" }))]))
        } } }
    }));
    let document = header(&schema);
    let expected = concat!(
        "\n",
        "/**\n",
        " * Native module specs for library 'app'.\n",
        " *\n",
        " * @generated by modulegen-objc\n",
        " */\n",
        "\n",
        "#ifndef __cplusplus\n",
        "#error This file must be compiled as Obj-C++. If you are importing it, you must change your file extension to .mm.\n",
        "#endif\n",
        "\n",
        "#import <vector>\n",
        "\n",
        "#import <Foundation/Foundation.h>\n",
        "\n",
        "#import <folly/Optional.h>\n",
        "\n",
        "#import <RCTRequired/RCTRequired.h>\n",
        "#import <RCTTypeSafety/RCTConvertHelpers.h>\n",
        "#import <RCTTypeSafety/RCTTypedModuleConstants.h>\n",
        "\n",
        "#import <React/RCTBridgeModule.h>\n",
        "#import <React/RCTCxxConvert.h>\n",
        "#import <React/RCTManagedPointer.h>\n",
        "\n",
        "#import <ReactCommon/RCTTurboModule.h>\n",
        "\n",
        "\n",
        "\n",
        "@protocol NativeSampleSpec <RCTBridgeModule, RCTTurboModule>\n",
        "- (void) reload;\n",
        "@end\n",
        "\n",
        "\n",
        "namespace facebook {\n",
        "  namespace react {\n",
        "    /**\n",
        "    * ObjC++ class for module 'Sample'\n",
        "    */\n",
        "    class JSI_EXPORT NativeSampleSpecJSI : public ObjCTurboModule {\n",
        "    public:\n",
        "      NativeSampleSpecJSI(const ObjCTurboModule::InitParams &params);\n",
        "    };\n",
        "  } // namespace react\n",
        "} // namespace facebook\n",
    );
    assert_eq!(document, expected);
}

#[test]
fn sample_fixture_matches_golden_header() {
    let files = generate(
        &sample_schema(),
        &GenerateOptions::new("SampleTurboModule").with_library_name("fixtures"),
    )
    .unwrap();
    let expected = std::fs::read_to_string(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/dev-test-runner/fixtures/SampleTurboModule.h"
    ))
    .unwrap();
    assert_eq!(files["SampleTurboModule.h"], expected);
}

#[test]
fn output_is_deterministic() {
    let schema = sample_schema();
    assert_eq!(header(&schema), header(&schema));
}

#[test]
fn modules_are_sorted_by_name() {
    let void = json!({ "type": "VoidTypeAnnotation" });
    let schema = schema(json!({
        "modules": {
            "B": { "nativeModules": { "Zulu": module(json!([method("a", json!([]), void.clone())])) } },
            "A": { "nativeModules": {
                "Mike": module(json!([method("b", json!([]), void.clone())])),
                "Alpha": module(json!([method("c", json!([]), void)]))
            } }
        }
    }));
    let document = header(&schema);
    let positions: Vec<usize> = ["NativeAlphaSpec <", "NativeMikeSpec <", "NativeZuluSpec <"]
        .iter()
        .map(|needle| document.find(needle).unwrap())
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]), "{positions:?}");

    let classes: Vec<usize> = ["NativeAlphaSpecJSI(", "NativeMikeSpecJSI(", "NativeZuluSpecJSI("]
        .iter()
        .map(|needle| document.find(needle).unwrap())
        .collect();
    assert!(classes.windows(2).all(|pair| pair[0] < pair[1]), "{classes:?}");
}

/// Nested records under a parameter, a nullable return and `getConstants`.
fn store_schema() -> Schema {
    schema(json!({
        "modules": { "Pkg": { "nativeModules": { "Store": module(json!([
            method(
                "save",
                json!([{ "name": "options", "nullable": false, "typeAnnotation": {
                    "type": "ObjectTypeAnnotation",
                    "properties": [
                        { "name": "meta", "optional": true, "typeAnnotation": {
                            "type": "ObjectTypeAnnotation",
                            "properties": [{ "name": "owner", "optional": false, "typeAnnotation": { "type": "StringTypeAnnotation" } }]
                        } },
                        { "name": "rows", "optional": false, "typeAnnotation": {
                            "type": "ArrayTypeAnnotation",
                            "elementType": { "type": "ObjectTypeAnnotation", "properties": [
                                { "name": "id", "optional": false, "typeAnnotation": { "type": "Int32TypeAnnotation" } }
                            ] }
                        } }
                    ]
                } }]),
                json!({ "type": "VoidTypeAnnotation" })
            ),
            method(
                "status",
                json!([]),
                json!({ "nullable": true, "type": "ObjectTypeAnnotation", "properties": [
                    { "name": "detail", "optional": false, "typeAnnotation": {
                        "type": "ObjectTypeAnnotation",
                        "properties": [{ "name": "code", "optional": false, "typeAnnotation": { "type": "NumberTypeAnnotation" } }]
                    } }
                ] })
            ),
            method(
                "getConstants",
                json!([]),
                json!({ "type": "ObjectTypeAnnotation", "properties": [
                    { "name": "limits", "optional": false, "typeAnnotation": {
                        "type": "ObjectTypeAnnotation",
                        "properties": [{ "name": "max", "optional": false, "typeAnnotation": { "type": "NumberTypeAnnotation" } }]
                    } }
                ] })
            )
        ])) } } }
    }))
}

#[test]
fn every_struct_reference_is_declared() {
    let document = header(&store_schema());

    let reference = Regex::new(r"JS::NativeStore::Spec(\w+)").unwrap();
    let names: Vec<&str> = reference
        .captures_iter(&document)
        .map(|captures| captures.get(1).unwrap().as_str())
        .collect();
    for expected in [
        "SaveOptions",
        "SaveOptionsMeta",
        "SaveOptionsRowsElement",
        "StatusReturnType",
        "StatusReturnTypeDetail",
        "ConstantsLimits",
    ] {
        assert!(names.contains(&expected), "{expected} is never referenced");
    }
    for name in names {
        assert!(document.contains(&format!("struct Spec{name} {{")), "Spec{name} is referenced but not declared");
    }
    assert!(document.contains("    struct Constants {\n"));
    assert!(document.contains(
        "- (folly::Optional<JS::NativeStore::SpecStatusReturnType::Builder>) status;"
    ));
}

#[test]
fn sample_module_methods() {
    let document = header(&sample_schema());
    for line in [
        "- (facebook::react::ModuleConstants<JS::NativeSampleTurboModule::Constants::Builder>)constantsToExport;",
        "- (facebook::react::ModuleConstants<JS::NativeSampleTurboModule::Constants::Builder>)getConstants;",
        "- (void) voidFunc;",
        "- (BOOL) getBool:(BOOL)arg;",
        "- (NSDictionary *) getObject:(NSDictionary *)arg;",
        "- (void) getValueWithCallback:(RCTResponseSenderBlock)callback;",
        "- (void) getValueWithPromise:(BOOL)error\n   resolve:(RCTPromiseResolveBlock)resolve\n   reject:(RCTPromiseRejectBlock)reject;",
        "- (NSNumber *) getRootTag:(double)arg;",
        "- (void) saveOptions:(JS::NativeSampleTurboModule::SpecSaveOptionsOptions&)options;",
    ] {
        assert!(document.contains(line), "missing {line:?}");
    }
    assert!(document.contains("          RCTRequired<bool> const1;\n"));
    assert!(document.contains("      folly::Optional<double> retries() const;\n"));
    assert!(document.contains("      facebook::react::LazyVector<NSString *> tags() const;\n"));
}

#[test]
fn callable_field_three_levels_down_is_reported_with_its_path() {
    let callback = json!({ "name": "callback", "optional": false, "typeAnnotation": { "type": "FunctionTypeAnnotation" } });
    let inner = json!({ "name": "inner", "optional": false, "typeAnnotation": { "type": "ObjectTypeAnnotation", "properties": [callback] } });
    let nested = json!({ "name": "nested", "optional": false, "typeAnnotation": { "type": "ObjectTypeAnnotation", "properties": [inner] } });
    let schema = schema(json!({
        "modules": { "Pkg": { "nativeModules": { "Sample": module(json!([method(
            "save",
            json!([{ "name": "options", "nullable": false, "typeAnnotation": { "type": "ObjectTypeAnnotation", "properties": [nested] } }]),
            json!({ "type": "VoidTypeAnnotation" })
        )])) } } }
    }));
    let error = generate(&schema, &GenerateOptions::default()).unwrap_err();
    assert_eq!(
        error,
        Error::UnsupportedType {
            location: Location::Field {
                module: "Sample".into(),
                method: "save".into(),
                path: "options.nested.inner.callback".into(),
            },
            found: "FunctionTypeAnnotation".into(),
        }
    );
}

#[test]
fn module_declared_twice_is_rejected() {
    let void = json!({ "type": "VoidTypeAnnotation" });
    let schema = schema(json!({
        "modules": {
            "A": { "nativeModules": { "Sample": module(json!([method("a", json!([]), void.clone())])) } },
            "B": { "nativeModules": { "Sample": module(json!([method("b", json!([]), void)])) } }
        }
    }));
    assert!(matches!(
        generate(&schema, &GenerateOptions::default()),
        Err(Error::DuplicateModule { .. })
    ));
}

#[test]
fn structs_are_declared_before_first_use() {
    let document = header(&store_schema());

    let limits_declared = document.find("struct SpecConstantsLimits {").unwrap();
    let limits_used = document
        .find("RCTRequired<JS::NativeStore::SpecConstantsLimits::Builder> limits;")
        .unwrap();
    assert!(limits_declared < limits_used, "declared at {limits_declared}, used at {limits_used}");

    let reference = Regex::new(r"JS::NativeStore::Spec(\w+)").unwrap();
    for captures in reference.captures_iter(&document) {
        let name = captures.get(1).unwrap().as_str();
        let used = captures.get(0).unwrap().start();
        let declared = document.find(&format!("struct Spec{name} {{")).unwrap();
        assert!(declared < used, "Spec{name} used at {used} before its declaration at {declared}");
    }
}

#[test]
fn colliding_struct_names_from_distinct_params_abort_generation() {
    let record = |field: &str| json!({
        "type": "ObjectTypeAnnotation",
        "properties": [{ "name": field, "optional": false, "typeAnnotation": { "type": "StringTypeAnnotation" } }]
    });
    let schema = schema(json!({
        "modules": { "Pkg": { "nativeModules": { "Sample": module(json!([method(
            "save",
            json!([
                { "name": "options", "nullable": false, "typeAnnotation": {
                    "type": "ObjectTypeAnnotation",
                    "properties": [{ "name": "items", "optional": false, "typeAnnotation": record("x") }]
                } },
                { "name": "optionsItems", "nullable": false, "typeAnnotation": record("y") }
            ]),
            json!({ "type": "VoidTypeAnnotation" })
        )])) } } }
    }));
    // `options.items` and `optionsItems` both name `SaveOptionsItems`
    assert_eq!(
        generate(&schema, &GenerateOptions::default()).unwrap_err(),
        Error::DuplicateStruct {
            module: "Sample".into(),
            name: "SaveOptionsItems".into(),
            origin: "save.optionsItems".into(),
        }
    );
}
