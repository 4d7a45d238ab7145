//! Infrastructure layer: stores, the purchase coordinator, config.

pub mod config;
pub mod coordinator;
pub mod retry;
pub mod store;


pub use coordinator::PurchaseCoordinator;
pub use retry::{BackoffStrategy, RetryPolicy};
pub use store::{
    InMemoryMarketStore, ItemRepository, ItemStore, MessageRepository, PostgresMarketStore,
    PurchaseStore, StoreError, TransactionLog, UnitOfWork, UserRepository,
};
