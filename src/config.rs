/// Extension of the generated header.
pub const HEADER_EXTENSION: &str = "h";

/// Caller-supplied settings for one generation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Named in the generated file's header comment.
    pub library_name: String,
    /// Stem of the generated file name.
    pub module_spec_name: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            library_name: "app".to_string(),
            module_spec_name: "NativeModuleSpecs".to_string(),
        }
    }
}

impl GenerateOptions {
    pub fn new(module_spec_name: impl Into<String>) -> Self {
        Self {
            module_spec_name: module_spec_name.into(),
            ..Default::default()
        }
    }

    pub fn with_library_name(mut self, library_name: impl Into<String>) -> Self {
        self.library_name = library_name.into();
        self
    }

    pub fn file_name(&self) -> String {
        format!("{}.{HEADER_EXTENSION}", self.module_spec_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_uses_header_extension() {
        let options = GenerateOptions::new("SampleSpec").with_library_name("sample");
        assert_eq!(options.file_name(), "SampleSpec.h");
        assert_eq!(options.library_name, "sample");
    }
}
