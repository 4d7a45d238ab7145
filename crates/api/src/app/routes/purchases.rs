use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Query,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};

use bazaar_core::{ItemId, UserId};
use bazaar_infra::PurchaseStore;
use bazaar_purchasing::{PurchaseError, PurchaseRequest};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/", post(purchase_item).get(list_purchases))
}

pub async fn purchase_item(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::PurchaseRequestBody>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    let request = match PurchaseRequest::new(body.item_id, body.buyer_id) {
        Ok(r) => r,
        Err(e) => return errors::purchase_error_to_response(PurchaseError::from(e)),
    };

    match services
        .coordinator
        .purchase_with_retry(request.item_id(), request.buyer_id(), &services.retry)
        .await
    {
        Ok(_) => (
            StatusCode::OK,
            Json(serde_json::json!({ "status": "success" })),
        )
            .into_response(),
        Err(e) => errors::purchase_error_to_response(e),
    }
}

/// `?item_id=` or `?buyer_id=`; exactly one is required.
pub async fn list_purchases(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::PurchasesQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return errors::query_rejection_to_response(rejection),
    };

    let result = match (query.item_id, query.buyer_id) {
        (Some(item_id), None) => match ItemId::parse_valid(item_id) {
            Ok(id) => services.purchases.purchases_for_item(id).await,
            Err(e) => return errors::domain_error_to_response(e),
        },
        (None, Some(buyer_id)) => match UserId::parse_valid(buyer_id) {
            Ok(id) => services.purchases.purchases_by_buyer(id).await,
            Err(e) => return errors::domain_error_to_response(e),
        },
        _ => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "validation_error",
                "exactly one of item_id or buyer_id is required",
            );
        }
    };

    match result {
        Ok(records) => {
            let items = records
                .into_iter()
                .map(dto::PurchaseResponse::from)
                .collect::<Vec<_>>();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}
