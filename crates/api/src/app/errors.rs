use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use bazaar_core::DomainError;
use bazaar_infra::StoreError;
use bazaar_purchasing::PurchaseError;

pub fn purchase_error_to_response(err: PurchaseError) -> axum::response::Response {
    let status = match &err {
        PurchaseError::Validation(_) => StatusCode::BAD_REQUEST,
        PurchaseError::NotFound(_) => StatusCode::NOT_FOUND,
        PurchaseError::AlreadySold(_) => StatusCode::CONFLICT,
        PurchaseError::TransactionFailed(_) => StatusCode::SERVICE_UNAVAILABLE,
    };
    json_error(status, err.code(), err.to_string())
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) | DomainError::InvalidId(msg) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
        DomainError::InvariantViolation(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invariant_violation", msg)
        }
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
    }
}

/// Storage failures outside the purchase path (CRUD surfaces).
pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    tracing::error!(error = %err, "store operation failed");
    match err {
        StoreError::Constraint(msg) => json_error(StatusCode::CONFLICT, "constraint_violation", msg),
        StoreError::LockTimeout(_) | StoreError::Serialization(_) => json_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "store_busy",
            "storage is busy, retry later",
        ),
        _ => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "store_error",
            "internal storage error",
        ),
    }
}

/// Malformed or mistyped JSON bodies are client errors.
pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "validation_error", rejection.body_text())
}

pub fn query_rejection_to_response(rejection: QueryRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "validation_error", rejection.body_text())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
