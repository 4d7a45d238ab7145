use axum::{routing::get, Router};

pub mod items;
pub mod messages;
pub mod purchases;
pub mod system;
pub mod users;

/// Router for every marketplace endpoint.
pub fn router() -> Router {
    Router::new()
        .nest("/purchases", purchases::router())
        .nest("/items", items::router())
        .route("/categories", get(items::list_categories))
        .nest("/users", users::router())
        .nest("/messages", messages::router())
}
