//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no router is
//! involved.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use innvo_api::error::AppError;
use innvo_core::error::CoreError;
use innvo_core::jobs::{JobError, JobFailureCause};
use innvo_db::store::StoreError;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Asset",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Asset with id 42 not found");
}

#[tokio::test]
async fn missing_id_returns_404() {
    let err = AppError::Core(CoreError::MissingId { entity: "Asset" });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn validation_error_returns_400() {
    let err: AppError = StoreError::Core(CoreError::Validation(
        "A new asset cannot already have an ID".into(),
    ))
    .into();

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "A new asset cannot already have an ID");
}

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("secret database credentials leaked".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn row_not_found_returns_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn other_database_errors_are_sanitized() {
    let err = AppError::Database(sqlx::Error::PoolTimedOut);

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn fetch_failure_returns_502() {
    let err = AppError::Job(JobError::fetch_failed(
        "innvo-pentaho/transformations/transformation1.ktr",
        "NoSuchKey",
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["code"], "JOB_FETCH_FAILED");
    assert!(json["error"].as_str().unwrap().contains("transformation1.ktr"));
}

#[tokio::test]
async fn runner_failure_returns_500_with_cause() {
    let err = AppError::Job(
        JobFailureCause::NonZeroExit {
            exit_code: 2,
            stderr: "bad step".into(),
        }
        .into(),
    );

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "JOB_EXECUTION_FAILED");
    assert!(json["error"].as_str().unwrap().contains("exited with code 2"));
}

#[tokio::test]
async fn timeout_returns_504() {
    let err = AppError::Job(JobFailureCause::Timeout { elapsed_ms: 1000 }.into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(json["code"], "JOB_TIMEOUT");
}

#[tokio::test]
async fn service_unavailable_returns_503() {
    let err = AppError::ServiceUnavailable("No job is configured".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["code"], "SERVICE_UNAVAILABLE");
}

#[tokio::test]
async fn bad_request_returns_400() {
    let err = AppError::BadRequest("missing field `name`".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "missing field `name`");
}
