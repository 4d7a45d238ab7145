use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use bazaar_catalog::{Category, Item, ItemListing, ItemStatus, NewItem};
use bazaar_core::{ItemId, UserId};
use bazaar_messaging::{Message, NewMessage};
use bazaar_purchasing::PurchaseRecord;
use bazaar_users::{NewUser, User};

/// Storage operation error.
///
/// These are **infrastructure errors** (locking, connectivity, constraints) as
/// opposed to domain errors. Every variant surfaces to purchase callers as a
/// retryable transaction failure.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The per-item lock could not be acquired in time.
    #[error("lock not available: {0}")]
    LockTimeout(String),

    /// A status write was attempted without holding the item's lock.
    #[error("lock on item {0} is not held by this unit of work")]
    LockNotHeld(ItemId),

    /// Deadlock or serialization failure reported by the database.
    #[error("serialization failure: {0}")]
    Serialization(String),

    #[error("constraint violation: {0}")]
    Constraint(String),

    #[error("row not found: {0}")]
    RowNotFound(String),

    /// The unit of work was already committed or rolled back.
    #[error("unit of work is closed")]
    TransactionClosed,

    /// Deliberate failure armed through fault injection (tests/dev only).
    #[error("injected fault in {0}")]
    InjectedFault(&'static str),

    #[error("failed to decode row: {0}")]
    Decode(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("storage lock poisoned")]
    Poisoned,
}

/// Item-side operations of a unit of work.
#[async_trait]
pub trait ItemStore: Send {
    /// Read the item's status and take its exclusive lock until the unit of
    /// work ends. Blocks while another unit of work holds the same item.
    ///
    /// Returns `None` when the item does not exist.
    async fn read_status_for_update(
        &mut self,
        item_id: ItemId,
    ) -> Result<Option<ItemStatus>, StoreError>;

    /// Write a new status. Only valid for an item locked by this unit of work.
    async fn write_status(&mut self, item_id: ItemId, status: ItemStatus)
    -> Result<(), StoreError>;
}

/// Append side of the purchase log, inside a unit of work.
#[async_trait]
pub trait TransactionLog: Send {
    /// Insert-only. Never consulted for duplicate detection.
    async fn append(
        &mut self,
        item_id: ItemId,
        buyer_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Result<PurchaseRecord, StoreError>;
}

/// One atomic group of item and log operations.
///
/// Dropping an open unit of work without committing rolls it back and
/// releases every lock it holds.
#[async_trait]
pub trait UnitOfWork: ItemStore + TransactionLog {
    /// Make all staged writes visible at once and release locks.
    ///
    /// On error nothing was applied.
    async fn commit(&mut self) -> Result<(), StoreError>;

    async fn rollback(&mut self) -> Result<(), StoreError>;
}

/// Entry point to the purchase path of a backend.
#[async_trait]
pub trait PurchaseStore: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, StoreError>;

    /// Committed purchase records for an item, oldest first.
    async fn purchases_for_item(&self, item_id: ItemId)
    -> Result<Vec<PurchaseRecord>, StoreError>;

    async fn purchases_by_buyer(&self, buyer_id: UserId)
    -> Result<Vec<PurchaseRecord>, StoreError>;
}

#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Store a new listing; it always starts `ON_SALE`.
    ///
    /// An unknown category is a `Constraint` error.
    async fn create_item(&self, item: NewItem) -> Result<Item, StoreError>;

    async fn get_item(&self, item_id: ItemId) -> Result<Option<Item>, StoreError>;

    /// All items with their category names, ordered by id.
    async fn list_items(&self) -> Result<Vec<ItemListing>, StoreError>;

    /// All categories ordered by id.
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn register(&self, user: NewUser) -> Result<User, StoreError>;

    /// Exact-name match, ordered by id.
    async fn find_by_name(&self, name: &str) -> Result<Vec<User>, StoreError>;
}

#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn send(&self, message: NewMessage) -> Result<Message, StoreError>;

    /// Both directions between `user_a` and `user_b` about `item_id`,
    /// oldest first.
    async fn conversation(
        &self,
        item_id: ItemId,
        user_a: UserId,
        user_b: UserId,
    ) -> Result<Vec<Message>, StoreError>;
}

#[async_trait]
impl<S> PurchaseStore for Arc<S>
where
    S: PurchaseStore + ?Sized,
{
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, StoreError> {
        (**self).begin().await
    }

    async fn purchases_for_item(
        &self,
        item_id: ItemId,
    ) -> Result<Vec<PurchaseRecord>, StoreError> {
        (**self).purchases_for_item(item_id).await
    }

    async fn purchases_by_buyer(
        &self,
        buyer_id: UserId,
    ) -> Result<Vec<PurchaseRecord>, StoreError> {
        (**self).purchases_by_buyer(buyer_id).await
    }
}

#[async_trait]
impl<S> ItemRepository for Arc<S>
where
    S: ItemRepository + ?Sized,
{
    async fn create_item(&self, item: NewItem) -> Result<Item, StoreError> {
        (**self).create_item(item).await
    }

    async fn get_item(&self, item_id: ItemId) -> Result<Option<Item>, StoreError> {
        (**self).get_item(item_id).await
    }

    async fn list_items(&self) -> Result<Vec<ItemListing>, StoreError> {
        (**self).list_items().await
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        (**self).list_categories().await
    }
}
