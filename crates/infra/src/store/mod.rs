//! Marketplace storage boundary.
//!
//! The purchase path talks to storage only through a [`UnitOfWork`]: an
//! [`ItemStore`] (per-item locking reads and status writes) and a
//! [`TransactionLog`] (purchase appends) that commit or roll back together.
//! The peripheral CRUD surfaces (items, users, messages) are plain
//! repositories outside any unit of work.

pub mod in_memory;
pub mod postgres;
pub mod schema;
pub mod r#trait;

pub use in_memory::{InMemoryMarketStore, InMemoryUnitOfWork};
pub use postgres::{PostgresMarketStore, PostgresUnitOfWork};
pub use r#trait::{
    ItemRepository, ItemStore, MessageRepository, PurchaseStore, StoreError, TransactionLog,
    UnitOfWork, UserRepository,
};
