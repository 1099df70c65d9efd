//! HTTP surface of the validation server

use axum::{
    body::Bytes,
    extract::Path,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use dosette_codec::{decode_hinted, Resource};

use crate::error::Result;

/// Build the application router.
pub fn create_router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/fhir/:resource_type", post(validate_resource))
}

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "supported": Resource::SUPPORTED,
    }))
}

/// Decode the posted resource against the type named in the path and echo the
/// canonical encoding back.
async fn validate_resource(
    Path(resource_type): Path<String>,
    body: Bytes,
) -> Result<Response> {
    let resource = decode_hinted(&body, &resource_type)?;

    tracing::debug!(
        resource_type = resource.type_name(),
        bytes = body.len(),
        "resource validated"
    );

    let encoded = dosette_codec::encode_any(&resource)?;
    let mut response = (StatusCode::OK, encoded).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/fhir+json; charset=utf-8"),
    );
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    async fn post_fhir(resource_type: &str, body: Value) -> (StatusCode, Value) {
        let app = create_router();
        let request = Request::builder()
            .method("POST")
            .uri(format!("/fhir/{resource_type}"))
            .header("content-type", "application/fhir+json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap();
        (status, value)
    }

    #[tokio::test]
    async fn health_reports_supported_kinds() {
        let app = create_router();
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["supported"][2], "List");
    }

    #[tokio::test]
    async fn valid_resource_is_echoed_back() {
        let input = serde_json::json!({
            "resourceType": "MedicationStatement",
            "status": "active",
            "medicationCodeableConcept": {"text": "Aspirin"},
            "effectiveDateTime": "2024-01-01T00:00:00Z"
        });
        let (status, body) = post_fhir("MedicationStatement", input.clone()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, input);
    }

    #[tokio::test]
    async fn choice_conflict_becomes_an_operation_outcome() {
        let input = serde_json::json!({
            "resourceType": "MedicationStatement",
            "status": "active",
            "medicationCodeableConcept": {"text": "Aspirin"},
            "effectiveDateTime": "2024-01-01T00:00:00Z",
            "effectivePeriod": {"start": "2024-01-01T00:00:00Z"}
        });
        let (status, body) = post_fhir("MedicationStatement", input).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["resourceType"], "OperationOutcome");
        assert_eq!(body["issue"][0]["code"], "invalid");
        let diagnostics = body["issue"][0]["diagnostics"].as_str().unwrap();
        assert!(diagnostics.contains("effective"), "got {diagnostics:?}");
    }

    #[tokio::test]
    async fn unsupported_path_type_is_not_found() {
        let input = serde_json::json!({"resourceType": "Patient"});
        let (status, body) = post_fhir("Patient", input).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["issue"][0]["code"], "not-supported");
    }

    #[tokio::test]
    async fn path_and_envelope_disagreement_is_rejected() {
        let input = serde_json::json!({
            "resourceType": "MedicationStatement",
            "status": "active",
            "medicationCodeableConcept": {"text": "Aspirin"}
        });
        let (status, body) = post_fhir("List", input).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let diagnostics = body["issue"][0]["diagnostics"].as_str().unwrap();
        assert!(diagnostics.contains("expected List"), "got {diagnostics:?}");
    }
}
