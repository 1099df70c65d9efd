//! Decode/encode error taxonomy
//!
//! Every variant is a local-construction failure: none is retried, none is
//! swallowed, and a failing decode never yields a partially-built resource.
//! The one deliberately lenient path is unrecognized content, which flows into
//! the extension carrier instead of erroring.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("expected a JSON object for the resource")]
    ExpectedObject,

    #[error("resource type mismatch: expected {expected}, found {found}")]
    ResourceTypeMismatch { expected: String, found: String },

    #[error("unsupported resource type: {0}")]
    UnsupportedResourceType(String),

    #[error("invalid value for {field}: {value:?} is not in the enumeration")]
    InvalidEnumValue { field: &'static str, value: String },

    #[error("choice group \"{group}\" has conflicting alternatives: {}", .populated.join(", "))]
    ChoiceGroupConflict {
        group: &'static str,
        populated: Vec<&'static str>,
    },

    #[error("choice group \"{group}\" is mandatory but no alternative is populated")]
    ChoiceGroupEmpty { group: &'static str },

    #[error("a list in empty mode must carry an emptyReason and no entries")]
    InconsistentListMode,

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("type mismatch: {0}")]
    TypeMismatch(#[source] serde_json::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] dosette_models::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
