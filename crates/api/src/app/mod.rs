//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store backend selection and the shared coordinator
//! - `routes/`: HTTP routes + handlers (one file per surface)
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use bazaar_infra::config::AppConfig;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use services::{AppServices, ServicesError};

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(config: &AppConfig) -> Result<Router, ServicesError> {
    let services = services::build_services(config).await?;
    Ok(build_app_with_services(services))
}

/// Router over pre-built services (tests inject seeded stores here).
pub fn build_app_with_services(services: AppServices) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::request_logging))
                .layer(Extension(Arc::new(services))),
        )
}
