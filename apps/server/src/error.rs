//! Error types for the validation server

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Codec(#[from] dosette_codec::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        use dosette_codec::Error as Codec;

        let (status, error_message) = match &self {
            Error::Codec(Codec::UnsupportedResourceType(_)) => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            Error::Codec(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            Error::Internal(_) => {
                tracing::error!("Internal error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "resourceType": "OperationOutcome",
            "issue": [{
                "severity": "error",
                "code": status_to_fhir_code(status),
                "diagnostics": error_message
            }]
        }));

        let mut response = (status, body).into_response();

        // Always emit a FHIR content type for OperationOutcome errors.
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/fhir+json; charset=utf-8"),
        );

        response
    }
}

fn status_to_fhir_code(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "invalid",
        StatusCode::NOT_FOUND => "not-supported",
        _ => "exception",
    }
}
