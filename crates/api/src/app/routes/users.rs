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

use bazaar_infra::UserRepository;
use bazaar_users::NewUser;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/", post(register_user).get(search_users))
}

pub async fn register_user(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::RegisterUserRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    let new_user = match NewUser::new(body.name, body.age) {
        Ok(u) => u,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.users.register(new_user).await {
        Ok(user) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "id": user.id.get() })),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn search_users(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::SearchUsersQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return errors::query_rejection_to_response(rejection),
    };

    let name = query.name.trim();
    if name.is_empty() {
        return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", "name is required");
    }

    match services.users.find_by_name(name).await {
        Ok(users) => {
            let users = users
                .into_iter()
                .map(dto::UserResponse::from)
                .collect::<Vec<_>>();
            (StatusCode::OK, Json(users)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}
