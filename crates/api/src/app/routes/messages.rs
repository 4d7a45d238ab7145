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
use bazaar_infra::MessageRepository;
use bazaar_messaging::NewMessage;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/", post(send_message).get(conversation))
}

pub async fn send_message(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::SendMessageRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    let message = match NewMessage::new(
        ItemId::new(body.item_id),
        UserId::new(body.sender_id),
        UserId::new(body.receiver_id),
        body.content,
    ) {
        Ok(m) => m,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.messages.send(message).await {
        Ok(sent) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "status": "sent", "id": sent.id.get() })),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn conversation(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::ConversationQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return errors::query_rejection_to_response(rejection),
    };

    let ids = ItemId::parse_valid(query.item_id).and_then(|item| {
        let user = UserId::parse_valid(query.user_id)?;
        let partner = UserId::parse_valid(query.partner_id)?;
        Ok((item, user, partner))
    });
    let (item_id, user_id, partner_id) = match ids {
        Ok(ids) => ids,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services
        .messages
        .conversation(item_id, user_id, partner_id)
        .await
    {
        Ok(messages) => {
            let messages = messages
                .into_iter()
                .map(dto::MessageResponse::from)
                .collect::<Vec<_>>();
            (StatusCode::OK, Json(messages)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}
