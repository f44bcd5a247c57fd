//! Tests for HTTP error mapping.

use super::*;
use crate::domain::Error;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::conflict("Email already registered"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("Access token required"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("Invalid or expired token"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("User not found"), StatusCode::NOT_FOUND)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

async fn response_body(response: HttpResponse) -> Value {
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    serde_json::from_slice(&bytes).expect("error body is JSON")
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_trace_id(expected_trace_id: String) {
    let error = Error::internal("connection string postgres://secret")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({ "secret": "x" }));

    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    assert_eq!(header.as_deref(), Some(expected_trace_id.as_str()));

    let body = response_body(response).await;
    assert_eq!(
        body,
        json!({
            "error": INTERNAL_ERROR_MESSAGE,
            "code": "internal_error",
            "traceId": expected_trace_id,
        })
    );
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_message_and_details() {
    let error = Error::invalid_request("All fields are required")
        .with_details(json!({ "code": "missing_fields" }));

    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().get(TRACE_ID_HEADER).is_none());

    let body = response_body(response).await;
    assert_eq!(body["error"], "All fields are required");
    assert_eq!(body["details"]["code"], "missing_fields");
    assert!(body.get("traceId").is_none());
}

#[rstest]
fn from_actix_error_is_redacted_internal_error() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), INTERNAL_ERROR_MESSAGE);
    assert_eq!(err.details(), None);
}

#[rstest]
#[case(JsonPayloadError::ContentType, "content_type")]
#[case(JsonPayloadError::Overflow { limit: 10 }, "too_large")]
#[actix_web::test]
async fn json_payload_errors_become_invalid_requests(
    #[case] payload_error: JsonPayloadError,
    #[case] reason: &str,
) {
    let request = TestRequest::default().to_http_request();
    let err = json_error_handler(payload_error, &request);

    let response = err.error_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_body(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["code"], reason);
}
