//! Primitive type mapping: schema annotation → Objective-C type token.
//!
//! Structured annotations normally never reach these tables; the struct
//! collector turns them into named references first. Both tables match
//! exhaustively, so a new annotation variant must be placed in each of them.

use crate::error::{Error, Location};
use crate::schema::{ReservedName, ReturnAnnotation, TypeAnnotation};

/// An annotation with no token for the position it appeared in.
///
/// Carries what was found; the caller knows where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unsupported(pub String);

impl Unsupported {
    pub fn at(self, location: Location) -> Error {
        Error::UnsupportedType { location, found: self.0 }
    }

    fn of(annotation: &TypeAnnotation) -> Self {
        Unsupported(annotation.tag().to_string())
    }
}

fn nullable_ref(nullable: bool, plain: &'static str, annotated: &'static str) -> &'static str {
    if nullable { annotated } else { plain }
}

/// Token for a method parameter.
pub fn param_type(annotation: &TypeAnnotation, nullable: bool) -> Result<&'static str, Unsupported> {
    let token = match annotation {
        TypeAnnotation::Reserved { name } => match name {
            ReservedName::RootTag => nullable_ref(nullable, "double", "NSNumber *"),
            ReservedName::Other(other) => return Err(Unsupported(other.clone())),
        },
        TypeAnnotation::String => nullable_ref(nullable, "NSString *", "NSString * _Nullable"),
        TypeAnnotation::Number | TypeAnnotation::Float | TypeAnnotation::Int32 => {
            nullable_ref(nullable, "double", "NSNumber *")
        }
        TypeAnnotation::Boolean => nullable_ref(nullable, "BOOL", "NSNumber * _Nullable"),
        // TODO: resolve aliases against the schema's alias table once the loader carries one
        TypeAnnotation::TypeAlias { .. } | TypeAnnotation::GenericObject | TypeAnnotation::Object { .. } => {
            nullable_ref(nullable, "NSDictionary *", "NSDictionary * _Nullable")
        }
        TypeAnnotation::Array { .. } => nullable_ref(nullable, "NSArray *", "NSArray * _Nullable"),
        TypeAnnotation::Function => "RCTResponseSenderBlock",
        TypeAnnotation::Void | TypeAnnotation::Promise => return Err(Unsupported::of(annotation)),
    };
    Ok(token)
}

/// Token for a method's declared return.
///
/// Arrays are typed `NSArray<id<NSObject>> *` here: the caller consumes them.
pub fn return_type(ret: &ReturnAnnotation) -> Result<&'static str, Unsupported> {
    let nullable = ret.nullable;
    let token = match &ret.annotation {
        TypeAnnotation::Reserved { name } => match name {
            ReservedName::RootTag => nullable_ref(nullable, "NSNumber *", "NSNumber * _Nullable"),
            ReservedName::Other(other) => return Err(Unsupported(other.clone())),
        },
        TypeAnnotation::Void | TypeAnnotation::Promise => "void",
        TypeAnnotation::String => nullable_ref(nullable, "NSString *", "NSString * _Nullable"),
        TypeAnnotation::Number | TypeAnnotation::Float | TypeAnnotation::Int32 => {
            nullable_ref(nullable, "NSNumber *", "NSNumber * _Nullable")
        }
        TypeAnnotation::Boolean => nullable_ref(nullable, "BOOL", "NSNumber * _Nullable"),
        TypeAnnotation::GenericObject | TypeAnnotation::Object { .. } => {
            nullable_ref(nullable, "NSDictionary *", "NSDictionary * _Nullable")
        }
        TypeAnnotation::Array { .. } => {
            nullable_ref(nullable, "NSArray<id<NSObject>> *", "NSArray<id<NSObject>> * _Nullable")
        }
        TypeAnnotation::Function | TypeAnnotation::TypeAlias { .. } => {
            return Err(Unsupported::of(&ret.annotation));
        }
    };
    Ok(token)
}
