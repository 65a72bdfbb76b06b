use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::schema::Schema;

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(into_parse_error)
}

pub fn from_slice_with_path<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let de = &mut serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize::<_, T>(de).map_err(into_parse_error)
}

/// Loads a schema document.
pub fn schema_from_slice(bytes: &[u8]) -> Result<Schema> {
    from_slice_with_path(bytes)
}

fn into_parse_error(err: serde_path_to_error::Error<serde_json::Error>) -> Error {
    Error::Parse {
        path: err.path().to_string(),
        message: err.into_inner().to_string(),
    }
}
