//! Objective-C++ protocol header generation for native module schemas.
pub mod cli;
pub mod collector;
pub mod config;
pub mod error;
pub mod generate;
pub mod mapper;
pub mod path_de;
pub mod render;
pub mod schema;
pub mod signature;
pub mod template;

pub use collector::StructDescriptor;
pub use config::GenerateOptions;
pub use error::{Error, Location, Result};
pub use generate::{generate, generate_with, GeneratedFiles};
pub use render::{ObjCxxStructRenderer, StructRenderer};
pub use schema::Schema;
