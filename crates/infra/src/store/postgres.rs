//! Postgres-backed marketplace store.
//!
//! The purchase path relies on row-level locking: `SELECT ... FOR UPDATE` on
//! the item row inside a transaction serializes concurrent buyers of the same
//! item, and the status update plus the purchase insert commit together.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | StoreError | Scenario |
//! |------------|----------------------|------------|----------|
//! | Database | `55P03` | `LockTimeout` | `lock_timeout` expired while waiting for the row |
//! | Database | `40P01`, `40001` | `Serialization` | Deadlock or serialization failure |
//! | Database | `23xxx` | `Constraint` | Foreign key, check, not-null or unique violation |
//! | Database (other) | Any other | `Database` | Other database errors |
//! | PoolClosed / PoolTimedOut | N/A | `Database` | No connection available |
//! | RowNotFound | N/A | `RowNotFound` | Unexpected (we use `fetch_optional`) |
//! | Other | N/A | `Database` | Network errors, TLS, protocol |

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, Row, Transaction};
use tracing::instrument;

use bazaar_catalog::{Category, Item, ItemListing, ItemStatus, NewItem, Price};
use bazaar_core::{CategoryId, ItemId, MessageId, PurchaseId, UserId};
use bazaar_messaging::{Message, NewMessage};
use bazaar_purchasing::PurchaseRecord;
use bazaar_users::{NewUser, User};

use super::r#trait::{
    ItemRepository, ItemStore, MessageRepository, PurchaseStore, StoreError, TransactionLog,
    UnitOfWork, UserRepository,
};

/// Postgres-backed implementation of every store trait.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Debug, Clone)]
pub struct PostgresMarketStore {
    pool: Arc<PgPool>,
    lock_timeout: Option<Duration>,
}

impl PostgresMarketStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
            lock_timeout: None,
        }
    }

    /// Apply `SET LOCAL lock_timeout` to every unit of work.
    ///
    /// A zero timeout means wait indefinitely, as Postgres reads `lock_timeout = 0`.
    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = (!timeout.is_zero()).then_some(timeout);
        self
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// One database transaction on the purchase path.
///
/// Dropping it while open rolls the transaction back (sqlx does this when the
/// connection is returned to the pool).
pub struct PostgresUnitOfWork {
    tx: Option<Transaction<'static, Postgres>>,
    locked: HashSet<ItemId>,
}

impl PostgresUnitOfWork {
    fn tx(&mut self) -> Result<&mut Transaction<'static, Postgres>, StoreError> {
        self.tx.as_mut().ok_or(StoreError::TransactionClosed)
    }
}

#[async_trait]
impl ItemStore for PostgresUnitOfWork {
    #[instrument(skip(self), fields(item_id = %item_id), err)]
    async fn read_status_for_update(
        &mut self,
        item_id: ItemId,
    ) -> Result<Option<ItemStatus>, StoreError> {
        let tx = self.tx()?;
        let row = sqlx::query(
            r#"
            SELECT status
            FROM items
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(item_id.get())
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| map_sqlx_error("read_status_for_update", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let status: String = row
            .try_get("status")
            .map_err(|e| StoreError::Decode(format!("failed to read status: {}", e)))?;
        let status = status
            .parse::<ItemStatus>()
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        self.locked.insert(item_id);
        Ok(Some(status))
    }

    #[instrument(skip(self), fields(item_id = %item_id, status = %status), err)]
    async fn write_status(
        &mut self,
        item_id: ItemId,
        status: ItemStatus,
    ) -> Result<(), StoreError> {
        if !self.locked.contains(&item_id) {
            return Err(StoreError::LockNotHeld(item_id));
        }
        let tx = self.tx()?;
        let result = sqlx::query(
            r#"
            UPDATE items
            SET status = $1
            WHERE id = $2
            "#,
        )
        .bind(status.as_str())
        .bind(item_id.get())
        .execute(&mut **tx)
        .await
        .map_err(|e| map_sqlx_error("write_status", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::RowNotFound(format!("item {item_id}")));
        }
        Ok(())
    }
}

#[async_trait]
impl TransactionLog for PostgresUnitOfWork {
    #[instrument(skip(self), fields(item_id = %item_id, buyer_id = %buyer_id), err)]
    async fn append(
        &mut self,
        item_id: ItemId,
        buyer_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Result<PurchaseRecord, StoreError> {
        let tx = self.tx()?;
        let row = sqlx::query(
            r#"
            INSERT INTO purchases (item_id, buyer_id, created_at)
            VALUES ($1, $2, $3)
            RETURNING id, item_id, buyer_id, created_at
            "#,
        )
        .bind(item_id.get())
        .bind(buyer_id.get())
        .bind(created_at)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| map_sqlx_error("append_purchase", e))?;

        PurchaseRow::from_row(&row)
            .map(Into::into)
            .map_err(|e| StoreError::Decode(format!("failed to read purchase row: {}", e)))
    }
}

#[async_trait]
impl UnitOfWork for PostgresUnitOfWork {
    async fn commit(&mut self) -> Result<(), StoreError> {
        let tx = self.tx.take().ok_or(StoreError::TransactionClosed)?;
        self.locked.clear();
        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("commit_transaction", e))
    }

    async fn rollback(&mut self) -> Result<(), StoreError> {
        let tx = self.tx.take().ok_or(StoreError::TransactionClosed)?;
        self.locked.clear();
        tx.rollback()
            .await
            .map_err(|e| map_sqlx_error("rollback", e))
    }
}

#[async_trait]
impl PurchaseStore for PostgresMarketStore {
    #[instrument(skip(self), err)]
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin_transaction", e))?;

        if let Some(timeout) = self.lock_timeout {
            // SET does not accept bind parameters; the value is a formatted integer.
            let sql = format!("SET LOCAL lock_timeout = '{}ms'", timeout.as_millis());
            sqlx::query(&sql)
                .execute(&mut *tx)
                .await
                .map_err(|e| map_sqlx_error("set_lock_timeout", e))?;
        }

        Ok(Box::new(PostgresUnitOfWork {
            tx: Some(tx),
            locked: HashSet::new(),
        }))
    }

    #[instrument(skip(self), fields(item_id = %item_id), err)]
    async fn purchases_for_item(
        &self,
        item_id: ItemId,
    ) -> Result<Vec<PurchaseRecord>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, item_id, buyer_id, created_at
            FROM purchases
            WHERE item_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(item_id.get())
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("purchases_for_item", e))?;

        decode_all(&rows, |row| PurchaseRow::from_row(row))
            .map(|rows| rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self), fields(buyer_id = %buyer_id), err)]
    async fn purchases_by_buyer(
        &self,
        buyer_id: UserId,
    ) -> Result<Vec<PurchaseRecord>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, item_id, buyer_id, created_at
            FROM purchases
            WHERE buyer_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(buyer_id.get())
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("purchases_by_buyer", e))?;

        decode_all(&rows, |row| PurchaseRow::from_row(row))
            .map(|rows| rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl ItemRepository for PostgresMarketStore {
    #[instrument(skip(self, item), fields(seller_id = %item.seller_id()), err)]
    async fn create_item(&self, item: NewItem) -> Result<Item, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO items (seller_id, category_id, name, price, description, image_name, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, seller_id, category_id, name, price, description, image_name, status
            "#,
        )
        .bind(item.seller_id().get())
        .bind(item.category_id().get())
        .bind(item.name())
        .bind(item.price().amount())
        .bind(item.description())
        .bind(item.image_name())
        .bind(ItemStatus::OnSale.as_str())
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_item", e))?;

        ItemRow::from_row(&row)
            .map_err(|e| StoreError::Decode(format!("failed to read item row: {}", e)))?
            .try_into()
    }

    #[instrument(skip(self), fields(item_id = %item_id), err)]
    async fn get_item(&self, item_id: ItemId) -> Result<Option<Item>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, seller_id, category_id, name, price, description, image_name, status
            FROM items
            WHERE id = $1
            "#,
        )
        .bind(item_id.get())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_item", e))?;

        match row {
            Some(row) => ItemRow::from_row(&row)
                .map_err(|e| StoreError::Decode(format!("failed to read item row: {}", e)))?
                .try_into()
                .map(Some),
            None => Ok(None),
        }
    }

    #[instrument(skip(self), err)]
    async fn list_items(&self) -> Result<Vec<ItemListing>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT i.id, i.seller_id, i.category_id, i.name, i.price, i.description,
                   i.image_name, i.status, c.name AS category_name
            FROM items i
            JOIN categories c ON i.category_id = c.id
            ORDER BY i.id ASC
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_items", e))?;

        rows.iter()
            .map(|row| -> Result<ItemListing, StoreError> {
                let category_name: String = row
                    .try_get("category_name")
                    .map_err(|e| StoreError::Decode(e.to_string()))?;
                let item: Item = ItemRow::from_row(row)
                    .map_err(|e| StoreError::Decode(e.to_string()))?
                    .try_into()?;
                Ok(ItemListing {
                    item,
                    category_name,
                })
            })
            .collect()
    }

    #[instrument(skip(self), err)]
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        let rows = sqlx::query("SELECT id, name FROM categories ORDER BY id ASC")
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_categories", e))?;

        decode_all(&rows, |row| {
            Ok(Category {
                id: CategoryId::new(row.try_get("id")?),
                name: row.try_get("name")?,
            })
        })
    }
}

#[async_trait]
impl UserRepository for PostgresMarketStore {
    #[instrument(skip(self, user), err)]
    async fn register(&self, user: NewUser) -> Result<User, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (name, age)
            VALUES ($1, $2)
            RETURNING id, name, age, registered_at
            "#,
        )
        .bind(user.name())
        .bind(user.age())
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("register_user", e))?;

        UserRow::from_row(&row)
            .map(Into::into)
            .map_err(|e| StoreError::Decode(format!("failed to read user row: {}", e)))
    }

    #[instrument(skip(self), err)]
    async fn find_by_name(&self, name: &str) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, age, registered_at
            FROM users
            WHERE name = $1
            ORDER BY id ASC
            "#,
        )
        .bind(name)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_users_by_name", e))?;

        decode_all(&rows, |row| UserRow::from_row(row))
            .map(|rows| rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl MessageRepository for PostgresMarketStore {
    #[instrument(
        skip(self, message),
        fields(item_id = %message.item_id(), sender_id = %message.sender_id()),
        err
    )]
    async fn send(&self, message: NewMessage) -> Result<Message, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO messages (item_id, sender_id, receiver_id, content)
            VALUES ($1, $2, $3, $4)
            RETURNING id, item_id, sender_id, receiver_id, content, created_at
            "#,
        )
        .bind(message.item_id().get())
        .bind(message.sender_id().get())
        .bind(message.receiver_id().get())
        .bind(message.content())
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("send_message", e))?;

        MessageRow::from_row(&row)
            .map(Into::into)
            .map_err(|e| StoreError::Decode(format!("failed to read message row: {}", e)))
    }

    #[instrument(skip(self), fields(item_id = %item_id), err)]
    async fn conversation(
        &self,
        item_id: ItemId,
        user_a: UserId,
        user_b: UserId,
    ) -> Result<Vec<Message>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, item_id, sender_id, receiver_id, content, created_at
            FROM messages
            WHERE item_id = $1
                AND ((sender_id = $2 AND receiver_id = $3)
                  OR (sender_id = $3 AND receiver_id = $2))
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(item_id.get())
        .bind(user_a.get())
        .bind(user_b.get())
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("conversation", e))?;

        decode_all(&rows, |row| MessageRow::from_row(row))
            .map(|rows| rows.into_iter().map(Into::into).collect())
    }
}

fn decode_all<T>(
    rows: &[sqlx::postgres::PgRow],
    decode: impl Fn(&sqlx::postgres::PgRow) -> Result<T, sqlx::Error>,
) -> Result<Vec<T>, StoreError> {
    rows.iter()
        .map(|row| decode(row).map_err(|e| StoreError::Decode(e.to_string())))
        .collect()
}

/// Map SQLx errors to StoreError.
pub(crate) fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());

            match db_err.code().as_deref() {
                // lock_not_available
                Some("55P03") => StoreError::LockTimeout(msg),
                // deadlock_detected, serialization_failure
                Some("40P01") | Some("40001") => StoreError::Serialization(msg),
                Some(code) if code.starts_with("23") => StoreError::Constraint(msg),
                _ => StoreError::Database(msg),
            }
        }
        sqlx::Error::PoolClosed => {
            StoreError::Database(format!("connection pool closed in {}", operation))
        }
        sqlx::Error::PoolTimedOut => {
            StoreError::Database(format!("timed out waiting for a connection in {}", operation))
        }
        sqlx::Error::RowNotFound => {
            StoreError::RowNotFound(format!("unexpected row not found in {}", operation))
        }
        _ => StoreError::Database(format!("sqlx error in {}: {}", operation, err)),
    }
}

// SQLx row types

#[derive(Debug)]
struct PurchaseRow {
    id: i64,
    item_id: i64,
    buyer_id: i64,
    created_at: DateTime<Utc>,
}

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for PurchaseRow {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        Ok(PurchaseRow {
            id: row.try_get("id")?,
            item_id: row.try_get("item_id")?,
            buyer_id: row.try_get("buyer_id")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

impl From<PurchaseRow> for PurchaseRecord {
    fn from(row: PurchaseRow) -> Self {
        PurchaseRecord {
            id: PurchaseId::new(row.id),
            item_id: ItemId::new(row.item_id),
            buyer_id: UserId::new(row.buyer_id),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug)]
struct ItemRow {
    id: i64,
    seller_id: i64,
    category_id: i64,
    name: String,
    price: i64,
    description: String,
    image_name: String,
    status: String,
}

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for ItemRow {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        Ok(ItemRow {
            id: row.try_get("id")?,
            seller_id: row.try_get("seller_id")?,
            category_id: row.try_get("category_id")?,
            name: row.try_get("name")?,
            price: row.try_get("price")?,
            description: row.try_get("description")?,
            image_name: row.try_get("image_name")?,
            status: row.try_get("status")?,
        })
    }
}

impl TryFrom<ItemRow> for Item {
    type Error = StoreError;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        let price = Price::new(row.price)
            .map_err(|e| StoreError::Decode(format!("item {}: {}", row.id, e)))?;
        let status = row
            .status
            .parse::<ItemStatus>()
            .map_err(|e| StoreError::Decode(format!("item {}: {}", row.id, e)))?;
        Ok(Item {
            id: ItemId::new(row.id),
            seller_id: UserId::new(row.seller_id),
            category_id: CategoryId::new(row.category_id),
            name: row.name,
            price,
            description: row.description,
            image_name: row.image_name,
            status,
        })
    }
}

#[derive(Debug)]
struct UserRow {
    id: i64,
    name: String,
    age: i32,
    registered_at: DateTime<Utc>,
}

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for UserRow {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        Ok(UserRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            age: row.try_get("age")?,
            registered_at: row.try_get("registered_at")?,
        })
    }
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: UserId::new(row.id),
            name: row.name,
            age: row.age,
            registered_at: row.registered_at,
        }
    }
}

#[derive(Debug)]
struct MessageRow {
    id: i64,
    item_id: i64,
    sender_id: i64,
    receiver_id: i64,
    content: String,
    created_at: DateTime<Utc>,
}

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for MessageRow {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        Ok(MessageRow {
            id: row.try_get("id")?,
            item_id: row.try_get("item_id")?,
            sender_id: row.try_get("sender_id")?,
            receiver_id: row.try_get("receiver_id")?,
            content: row.try_get("content")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

impl From<MessageRow> for Message {
    fn from(row: MessageRow) -> Self {
        Message {
            id: MessageId::new(row.id),
            item_id: ItemId::new(row.item_id),
            sender_id: UserId::new(row.sender_id),
            receiver_id: UserId::new(row.receiver_id),
            content: row.content,
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::PurchaseCoordinator;
    use crate::retry::RetryPolicy;
    use crate::store::schema::ensure_schema;
    use bazaar_purchasing::PurchaseError;
    use sqlx::postgres::PgPoolOptions;

    async fn connect() -> PostgresMarketStore {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let pool = PgPoolOptions::new()
            .max_connections(4)
            .connect(&url)
            .await
            .expect("connect");
        ensure_schema(&pool).await.expect("schema");
        PostgresMarketStore::new(pool).with_lock_timeout(Duration::from_millis(500))
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL pointing at a scratch Postgres database"]
    async fn second_purchase_of_same_item_sees_sold_out() {
        let store = connect().await;
        let item = store
            .create_item(
                NewItem::new(UserId::new(1), CategoryId::new(1), "Chair", 1200, "", "").unwrap(),
            )
            .await
            .unwrap();

        let mut first = store.begin().await.unwrap();
        assert_eq!(
            first.read_status_for_update(item.id).await.unwrap(),
            Some(ItemStatus::OnSale)
        );
        first.write_status(item.id, ItemStatus::SoldOut).await.unwrap();
        first.append(item.id, UserId::new(2), Utc::now()).await.unwrap();
        first.commit().await.unwrap();

        let mut second = store.begin().await.unwrap();
        assert_eq!(
            second.read_status_for_update(item.id).await.unwrap(),
            Some(ItemStatus::SoldOut)
        );
        second.rollback().await.unwrap();

        let records = store.purchases_for_item(item.id).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].buyer_id, UserId::new(2));
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL pointing at a scratch Postgres database"]
    async fn held_row_lock_times_out_the_second_transaction() {
        let store = connect().await;
        let item = store
            .create_item(
                NewItem::new(UserId::new(1), CategoryId::new(1), "Mirror", 800, "", "").unwrap(),
            )
            .await
            .unwrap();

        let mut holder = store.begin().await.unwrap();
        holder.read_status_for_update(item.id).await.unwrap();

        let mut waiter = store.begin().await.unwrap();
        let err = waiter.read_status_for_update(item.id).await.unwrap_err();
        assert!(matches!(err, StoreError::LockTimeout(_)), "got {err:?}");

        holder.rollback().await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    #[ignore = "requires DATABASE_URL pointing at a scratch Postgres database"]
    async fn concurrent_buyers_get_exactly_one_sale() {
        const BUYERS: i64 = 8;
        let store = connect().await;
        let item = store
            .create_item(
                NewItem::new(UserId::new(1), CategoryId::new(1), "Vase", 2500, "", "").unwrap(),
            )
            .await
            .unwrap();
        let item_id = item.id;
        let coordinator = Arc::new(PurchaseCoordinator::new(store.clone()));
        let policy = RetryPolicy::fixed(5, Duration::from_millis(20));

        let mut handles = Vec::new();
        for buyer in 1..=BUYERS {
            let coordinator = coordinator.clone();
            let policy = policy.clone();
            handles.push(tokio::spawn(async move {
                coordinator
                    .purchase_with_retry(item_id, UserId::new(buyer), &policy)
                    .await
            }));
        }

        let mut sold = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => sold += 1,
                Err(PurchaseError::AlreadySold(id)) => assert_eq!(id, item.id),
                Err(other) => panic!("unexpected outcome: {other:?}"),
            }
        }
        assert_eq!(sold, 1);

        assert_eq!(store.purchases_for_item(item.id).await.unwrap().len(), 1);
        let stored = store.get_item(item.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ItemStatus::SoldOut);
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL pointing at a scratch Postgres database"]
    async fn listings_join_the_category_name() {
        let store = connect().await;
        let item = store
            .create_item(
                NewItem::new(UserId::new(1), CategoryId::new(2), "Speaker", 4000, "", "").unwrap(),
            )
            .await
            .unwrap();

        let listings = store.list_items().await.unwrap();
        let listing = listings.iter().find(|l| l.item.id == item.id).unwrap();
        assert_eq!(listing.category_name, "Electronics");

        let err = store
            .create_item(
                NewItem::new(UserId::new(1), CategoryId::new(999), "Ghost", 1, "", "").unwrap(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)), "got {err:?}");
    }
}
