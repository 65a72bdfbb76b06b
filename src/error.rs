use std::fmt;

use thiserror::Error;

/// Where in a module an offending annotation sits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Param { module: String, method: String, param: String },
    Return { module: String, method: String },
    /// `path` is dotted from the parameter (or `return`) down to the field.
    Field { module: String, method: String, path: String },
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Param { module, method, param } => {
                write!(f, "param \"{param}\" in {module}.{method}")
            }
            Location::Return { module, method } => write!(f, "return type of {module}.{method}"),
            Location::Field { module, method, path } => {
                write!(f, "field \"{path}\" in {module}.{method}")
            }
        }
    }
}

/// Errors raised while loading, validating or translating a schema.
///
/// Every variant is fatal for the schema being generated: there is no
/// partial output.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Unsupported type for {location}. Found: {found}")]
    UnsupportedType { location: Location, found: String },

    #[error("Module '{name}' is declared by both '{first}' and '{second}'")]
    DuplicateModule {
        name: String,
        first: String,
        second: String,
    },

    #[error("Method '{method}' is declared more than once in module '{module}'")]
    DuplicateMethod { module: String, method: String },

    #[error("Parameter '{param}' is declared more than once in {module}.{method}")]
    DuplicateParam {
        module: String,
        method: String,
        param: String,
    },

    #[error("Struct name '{name}' is synthesized twice in module '{module}' (second from {origin})")]
    DuplicateStruct {
        module: String,
        name: String,
        origin: String,
    },

    #[error("Invalid {kind} identifier '{name}'")]
    InvalidIdentifier { kind: &'static str, name: String },

    #[error("Failed to parse schema at JSON path {path}: {message}")]
    Parse { path: String, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
