use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use bazaar_catalog::NewItem;
use bazaar_core::{CategoryId, ItemId, UserId};
use bazaar_infra::ItemRepository;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/:id", get(get_item))
}

pub async fn create_item(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::CreateItemRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    let new_item = match NewItem::new(
        UserId::new(body.seller_id),
        CategoryId::new(body.category_id),
        body.name,
        body.price,
        body.description,
        body.image_name,
    ) {
        Ok(i) => i,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.items.create_item(new_item).await {
        Ok(item) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "id": item.id.get() })),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ItemId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.items.get_item(id).await {
        Ok(Some(item)) => (StatusCode::OK, Json(dto::ItemResponse::from(item))).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "item not found"),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn list_items(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.items.list_items().await {
        Ok(listings) => {
            let listings = listings
                .into_iter()
                .map(dto::ListingResponse::from)
                .collect::<Vec<_>>();
            (StatusCode::OK, Json(listings)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn list_categories(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.items.list_categories().await {
        Ok(categories) => {
            let categories = categories
                .into_iter()
                .map(dto::CategoryResponse::from)
                .collect::<Vec<_>>();
            (StatusCode::OK, Json(categories)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}
