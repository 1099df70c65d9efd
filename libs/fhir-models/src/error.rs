//! Error type for model-level validation

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid value for {field}: {reason}")]
    InvalidFieldValue {
        field: &'static str,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
