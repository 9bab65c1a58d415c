use serde_json::Value;
use thiserror::Error;

/// Reasons a JSON value could not be decoded into a typed value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("Expecting {expected} but instead got: {found}")]
    TypeMismatch { expected: &'static str, found: String },

    #[error("Expecting an OBJECT with a field named `{0}`")]
    MissingField(String),

    #[error("Problem with the value at json.{field}: {source}")]
    Field {
        field: String,
        source: Box<DecodeError>,
    },

    #[error("Problem with the value at json[{index}]: {source}")]
    Index {
        index: usize,
        source: Box<DecodeError>,
    },

    #[error("This is not valid JSON! {0}")]
    Parse(String),
}

impl DecodeError {
    pub(crate) fn mismatch(expected: &'static str, found: &Value) -> Self {
        DecodeError::TypeMismatch {
            expected,
            found: serde_json::to_string(found).unwrap_or_default(),
        }
    }

    pub(crate) fn in_field(field: &str, source: DecodeError) -> Self {
        DecodeError::Field {
            field: field.to_string(),
            source: Box::new(source),
        }
    }

    pub(crate) fn at_index(index: usize, source: DecodeError) -> Self {
        DecodeError::Index {
            index,
            source: Box::new(source),
        }
    }
}
