//! Service wiring: picks a store backend and shares it with the handlers.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use bazaar_infra::config::{AppConfig, StoreBackend};
use bazaar_infra::store::schema::ensure_schema;
use bazaar_infra::{
    InMemoryMarketStore, ItemRepository, MessageRepository, PostgresMarketStore,
    PurchaseCoordinator, PurchaseStore, RetryPolicy, StoreError, UserRepository,
};

#[derive(Debug, Error)]
pub enum ServicesError {
    #[error("failed to connect to database: {0}")]
    Connect(#[from] sqlx::Error),

    #[error("failed to prepare database schema: {0}")]
    Schema(#[from] StoreError),
}

pub type Coordinator = PurchaseCoordinator<Arc<dyn PurchaseStore>>;

/// Everything a handler needs, shared through an `Extension`.
#[derive(Clone)]
pub struct AppServices {
    pub coordinator: Arc<Coordinator>,
    pub purchases: Arc<dyn PurchaseStore>,
    pub items: Arc<dyn ItemRepository>,
    pub users: Arc<dyn UserRepository>,
    pub messages: Arc<dyn MessageRepository>,
    pub retry: RetryPolicy,
}

impl AppServices {
    /// Wire every surface to one backing store.
    pub fn from_store<S>(store: S, retry: RetryPolicy) -> Self
    where
        S: PurchaseStore + ItemRepository + UserRepository + MessageRepository + 'static,
    {
        let store = Arc::new(store);
        let purchases: Arc<dyn PurchaseStore> = store.clone();
        Self {
            coordinator: Arc::new(PurchaseCoordinator::new(purchases.clone())),
            purchases,
            items: store.clone(),
            users: store.clone(),
            messages: store,
            retry,
        }
    }
}

pub async fn build_services(config: &AppConfig) -> Result<AppServices, ServicesError> {
    match &config.backend {
        StoreBackend::InMemory => {
            tracing::info!("using in-memory stores");
            let mut store = InMemoryMarketStore::new();
            if let Some(timeout) = config.lock_timeout {
                store = store.with_lock_timeout(timeout);
            }
            Ok(AppServices::from_store(store, config.retry.clone()))
        }
        StoreBackend::Postgres {
            database_url,
            max_connections,
        } => {
            tracing::info!(max_connections, "using postgres stores");
            let pool = PgPoolOptions::new()
                .max_connections(*max_connections)
                .connect(database_url)
                .await?;
            ensure_schema(&pool).await?;

            let mut store = PostgresMarketStore::new(pool);
            if let Some(timeout) = config.lock_timeout {
                store = store.with_lock_timeout(timeout);
            }
            Ok(AppServices::from_store(store, config.retry.clone()))
        }
    }
}
