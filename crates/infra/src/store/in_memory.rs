use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex as RowLock, OwnedMutexGuard};

use bazaar_catalog::{Category, Item, ItemListing, ItemStatus, NewItem};
use bazaar_core::{CategoryId, Entity, ItemId, MessageId, PurchaseId, UserId};
use bazaar_messaging::{Message, NewMessage, sort_conversation};
use bazaar_purchasing::PurchaseRecord;
use bazaar_users::{NewUser, User};

use super::r#trait::{
    ItemRepository, ItemStore, MessageRepository, PurchaseStore, StoreError, TransactionLog,
    UnitOfWork, UserRepository,
};

#[derive(Debug, Default)]
struct Tables {
    categories: BTreeMap<CategoryId, Category>,
    items: BTreeMap<ItemId, Item>,
    purchases: Vec<PurchaseRecord>,
    users: BTreeMap<UserId, User>,
    messages: Vec<Message>,
}

#[derive(Debug, Default)]
struct Faults {
    fail_next_append: AtomicBool,
    fail_next_commit: AtomicBool,
}

#[derive(Debug)]
struct Shared {
    tables: RwLock<Tables>,
    row_locks: Mutex<HashMap<ItemId, Arc<RowLock<()>>>>,
    next_item_id: AtomicI64,
    next_purchase_id: AtomicI64,
    next_user_id: AtomicI64,
    next_message_id: AtomicI64,
    faults: Faults,
}

impl Shared {
    fn row_lock(&self, item_id: ItemId) -> Result<Arc<RowLock<()>>, StoreError> {
        let mut locks = self.row_locks.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(locks
            .entry(item_id)
            .or_insert_with(|| Arc::new(RowLock::new(())))
            .clone())
    }

    /// Forget row locks nobody holds or waits on.
    ///
    /// The map keeps one `Arc`; every holder or waiter owns another.
    fn prune_row_locks(&self, ids: impl IntoIterator<Item = ItemId>) {
        let Ok(mut locks) = self.row_locks.lock() else {
            return;
        };
        for id in ids {
            if locks.get(&id).is_some_and(|lock| Arc::strong_count(lock) == 1) {
                locks.remove(&id);
            }
        }
    }
}

/// In-memory marketplace store.
///
/// Intended for tests/dev. Row locks are `tokio` mutexes keyed by item id, so
/// purchases of the same item serialize while unrelated items proceed
/// independently. Table data sits behind a `std` lock that is never held
/// across an `.await`.
#[derive(Debug, Clone)]
pub struct InMemoryMarketStore {
    shared: Arc<Shared>,
    lock_timeout: Option<Duration>,
}

impl Default for InMemoryMarketStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryMarketStore {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                tables: RwLock::new(Tables {
                    categories: Category::defaults()
                        .into_iter()
                        .map(|c| (c.id, c))
                        .collect(),
                    ..Tables::default()
                }),
                row_locks: Mutex::new(HashMap::new()),
                next_item_id: AtomicI64::new(1),
                next_purchase_id: AtomicI64::new(1),
                next_user_id: AtomicI64::new(1),
                next_message_id: AtomicI64::new(1),
                faults: Faults::default(),
            }),
            lock_timeout: None,
        }
    }

    /// Bound how long a unit of work waits for a row lock.
    ///
    /// A zero timeout means wait indefinitely, as Postgres reads `lock_timeout = 0`.
    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = (!timeout.is_zero()).then_some(timeout);
        self
    }

    /// Insert an item with a caller-chosen id (fixtures).
    ///
    /// Later `create_item` calls continue after the highest seeded id.
    pub fn seed_item(&self, item: Item) -> Result<(), StoreError> {
        let mut tables = self.shared.tables.write().map_err(|_| StoreError::Poisoned)?;
        let id = item.id();
        self.shared
            .next_item_id
            .fetch_max(id.get() + 1, Ordering::SeqCst);
        tables.items.insert(id, item);
        Ok(())
    }

    /// Make the next transaction-log append fail.
    pub fn fail_next_append(&self) {
        self.shared.faults.fail_next_append.store(true, Ordering::SeqCst);
    }

    /// Make the next commit fail (after all writes were staged).
    pub fn fail_next_commit(&self) {
        self.shared.faults.fail_next_commit.store(true, Ordering::SeqCst);
    }

    /// Every committed purchase record, oldest first.
    pub fn all_purchases(&self) -> Result<Vec<PurchaseRecord>, StoreError> {
        let tables = self.shared.tables.read().map_err(|_| StoreError::Poisoned)?;
        Ok(tables.purchases.clone())
    }
}

/// Unit of work over [`InMemoryMarketStore`].
///
/// Writes are staged locally and applied in one step at commit, while the row
/// locks are still held.
#[derive(Debug)]
pub struct InMemoryUnitOfWork {
    shared: Arc<Shared>,
    lock_timeout: Option<Duration>,
    held: HashMap<ItemId, OwnedMutexGuard<()>>,
    staged_status: HashMap<ItemId, ItemStatus>,
    staged_purchases: Vec<PurchaseRecord>,
    open: bool,
}

impl InMemoryUnitOfWork {
    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.open {
            Ok(())
        } else {
            Err(StoreError::TransactionClosed)
        }
    }

    fn close(&mut self) {
        self.open = false;
        self.staged_status.clear();
        self.staged_purchases.clear();
        self.release_locks();
    }

    fn release_locks(&mut self) {
        if self.held.is_empty() {
            return;
        }
        let ids: Vec<ItemId> = self.held.keys().copied().collect();
        // Dropping the guards releases the row locks.
        self.held.clear();
        self.shared.prune_row_locks(ids);
    }

    fn apply_staged(&mut self) -> Result<(), StoreError> {
        let mut tables = self.shared.tables.write().map_err(|_| StoreError::Poisoned)?;
        for (item_id, status) in self.staged_status.drain() {
            let item = tables
                .items
                .get_mut(&item_id)
                .ok_or_else(|| StoreError::RowNotFound(format!("item {item_id}")))?;
            item.status = status;
        }
        tables.purchases.append(&mut self.staged_purchases);
        Ok(())
    }
}

impl Drop for InMemoryUnitOfWork {
    fn drop(&mut self) {
        self.release_locks();
    }
}

#[async_trait]
impl ItemStore for InMemoryUnitOfWork {
    async fn read_status_for_update(
        &mut self,
        item_id: ItemId,
    ) -> Result<Option<ItemStatus>, StoreError> {
        self.ensure_open()?;

        if !self.held.contains_key(&item_id) {
            let row = self.shared.row_lock(item_id)?;
            let guard = match self.lock_timeout {
                Some(limit) => match tokio::time::timeout(limit, row.lock_owned()).await {
                    Ok(guard) => guard,
                    // The timed-out wait has already dropped its handle on the lock.
                    Err(_) => {
                        self.shared.prune_row_locks([item_id]);
                        return Err(StoreError::LockTimeout(format!(
                            "item {item_id} still locked after {}ms",
                            limit.as_millis()
                        )));
                    }
                },
                None => row.lock_owned().await,
            };
            self.held.insert(item_id, guard);
        }

        if let Some(status) = self.staged_status.get(&item_id) {
            return Ok(Some(*status));
        }

        let tables = self.shared.tables.read().map_err(|_| StoreError::Poisoned)?;
        Ok(tables.items.get(&item_id).map(|item| item.status))
    }

    async fn write_status(
        &mut self,
        item_id: ItemId,
        status: ItemStatus,
    ) -> Result<(), StoreError> {
        self.ensure_open()?;
        if !self.held.contains_key(&item_id) {
            return Err(StoreError::LockNotHeld(item_id));
        }

        let exists = {
            let tables = self.shared.tables.read().map_err(|_| StoreError::Poisoned)?;
            tables.items.contains_key(&item_id)
        };
        if !exists {
            return Err(StoreError::RowNotFound(format!("item {item_id}")));
        }

        self.staged_status.insert(item_id, status);
        Ok(())
    }
}

#[async_trait]
impl TransactionLog for InMemoryUnitOfWork {
    async fn append(
        &mut self,
        item_id: ItemId,
        buyer_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Result<PurchaseRecord, StoreError> {
        self.ensure_open()?;
        if self.shared.faults.fail_next_append.swap(false, Ordering::SeqCst) {
            return Err(StoreError::InjectedFault("append"));
        }

        // Ids consumed by rolled-back appends are not reused, like a sequence.
        let id = PurchaseId::new(self.shared.next_purchase_id.fetch_add(1, Ordering::SeqCst));
        let record = PurchaseRecord {
            id,
            item_id,
            buyer_id,
            created_at,
        };
        self.staged_purchases.push(record.clone());
        Ok(record)
    }
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    async fn commit(&mut self) -> Result<(), StoreError> {
        self.ensure_open()?;

        let result = if self.shared.faults.fail_next_commit.swap(false, Ordering::SeqCst) {
            Err(StoreError::InjectedFault("commit"))
        } else {
            self.apply_staged()
        };

        self.close();
        result
    }

    async fn rollback(&mut self) -> Result<(), StoreError> {
        self.ensure_open()?;
        self.close();
        Ok(())
    }
}

#[async_trait]
impl PurchaseStore for InMemoryMarketStore {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, StoreError> {
        Ok(Box::new(InMemoryUnitOfWork {
            shared: self.shared.clone(),
            lock_timeout: self.lock_timeout,
            held: HashMap::new(),
            staged_status: HashMap::new(),
            staged_purchases: Vec::new(),
            open: true,
        }))
    }

    async fn purchases_for_item(
        &self,
        item_id: ItemId,
    ) -> Result<Vec<PurchaseRecord>, StoreError> {
        let tables = self.shared.tables.read().map_err(|_| StoreError::Poisoned)?;
        Ok(tables
            .purchases
            .iter()
            .filter(|p| p.item_id == item_id)
            .cloned()
            .collect())
    }

    async fn purchases_by_buyer(
        &self,
        buyer_id: UserId,
    ) -> Result<Vec<PurchaseRecord>, StoreError> {
        let tables = self.shared.tables.read().map_err(|_| StoreError::Poisoned)?;
        Ok(tables
            .purchases
            .iter()
            .filter(|p| p.buyer_id == buyer_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ItemRepository for InMemoryMarketStore {
    async fn create_item(&self, item: NewItem) -> Result<Item, StoreError> {
        let mut tables = self.shared.tables.write().map_err(|_| StoreError::Poisoned)?;
        if !tables.categories.contains_key(&item.category_id()) {
            return Err(StoreError::Constraint(format!(
                "category {} does not exist",
                item.category_id()
            )));
        }
        let id = ItemId::new(self.shared.next_item_id.fetch_add(1, Ordering::SeqCst));
        let item = Item::from_new(id, item);
        tables.items.insert(id, item.clone());
        Ok(item)
    }

    async fn get_item(&self, item_id: ItemId) -> Result<Option<Item>, StoreError> {
        let tables = self.shared.tables.read().map_err(|_| StoreError::Poisoned)?;
        Ok(tables.items.get(&item_id).cloned())
    }

    async fn list_items(&self) -> Result<Vec<ItemListing>, StoreError> {
        let tables = self.shared.tables.read().map_err(|_| StoreError::Poisoned)?;
        // Inner join: items whose category is gone are not listed.
        Ok(tables
            .items
            .values()
            .filter_map(|item| {
                tables.categories.get(&item.category_id).map(|c| ItemListing {
                    item: item.clone(),
                    category_name: c.name.clone(),
                })
            })
            .collect())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        let tables = self.shared.tables.read().map_err(|_| StoreError::Poisoned)?;
        Ok(tables.categories.values().cloned().collect())
    }
}

#[async_trait]
impl UserRepository for InMemoryMarketStore {
    async fn register(&self, user: NewUser) -> Result<User, StoreError> {
        let mut tables = self.shared.tables.write().map_err(|_| StoreError::Poisoned)?;
        let id = UserId::new(self.shared.next_user_id.fetch_add(1, Ordering::SeqCst));
        let user = user.into_user(id, Utc::now());
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<User>, StoreError> {
        let tables = self.shared.tables.read().map_err(|_| StoreError::Poisoned)?;
        Ok(tables
            .users
            .values()
            .filter(|u| u.name == name)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl MessageRepository for InMemoryMarketStore {
    async fn send(&self, message: NewMessage) -> Result<Message, StoreError> {
        let mut tables = self.shared.tables.write().map_err(|_| StoreError::Poisoned)?;
        let id = MessageId::new(self.shared.next_message_id.fetch_add(1, Ordering::SeqCst));
        let message = message.into_message(id, Utc::now());
        tables.messages.push(message.clone());
        Ok(message)
    }

    async fn conversation(
        &self,
        item_id: ItemId,
        user_a: UserId,
        user_b: UserId,
    ) -> Result<Vec<Message>, StoreError> {
        let mut conversation: Vec<Message> = {
            let tables = self.shared.tables.read().map_err(|_| StoreError::Poisoned)?;
            tables
                .messages
                .iter()
                .filter(|m| m.is_between(item_id, user_a, user_b))
                .cloned()
                .collect()
        };
        sort_conversation(&mut conversation);
        Ok(conversation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_core::CategoryId;

    fn on_sale(id: i64) -> Item {
        let new = NewItem::new(UserId::new(100), CategoryId::new(1), "Lamp", 500, "", "")
            .unwrap();
        Item::from_new(ItemId::new(id), new)
    }

    async fn status_of(store: &InMemoryMarketStore, id: i64) -> ItemStatus {
        store.get_item(ItemId::new(id)).await.unwrap().unwrap().status
    }

    #[tokio::test]
    async fn commit_applies_status_and_record_together() {
        let store = InMemoryMarketStore::new();
        store.seed_item(on_sale(10)).unwrap();

        let mut uow = store.begin().await.unwrap();
        let status = uow.read_status_for_update(ItemId::new(10)).await.unwrap();
        assert_eq!(status, Some(ItemStatus::OnSale));
        uow.write_status(ItemId::new(10), ItemStatus::SoldOut).await.unwrap();
        uow.append(ItemId::new(10), UserId::new(1), Utc::now()).await.unwrap();

        // Nothing is visible before commit.
        assert_eq!(status_of(&store, 10).await, ItemStatus::OnSale);
        assert!(store.all_purchases().unwrap().is_empty());

        uow.commit().await.unwrap();
        assert_eq!(status_of(&store, 10).await, ItemStatus::SoldOut);
        assert_eq!(store.all_purchases().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn staged_status_is_visible_inside_the_unit_of_work() {
        let store = InMemoryMarketStore::new();
        store.seed_item(on_sale(3)).unwrap();

        let mut uow = store.begin().await.unwrap();
        uow.read_status_for_update(ItemId::new(3)).await.unwrap();
        uow.write_status(ItemId::new(3), ItemStatus::SoldOut).await.unwrap();
        let again = uow.read_status_for_update(ItemId::new(3)).await.unwrap();
        assert_eq!(again, Some(ItemStatus::SoldOut));
        uow.rollback().await.unwrap();

        assert_eq!(status_of(&store, 3).await, ItemStatus::OnSale);
    }

    #[tokio::test]
    async fn write_without_lock_is_rejected() {
        let store = InMemoryMarketStore::new();
        store.seed_item(on_sale(1)).unwrap();

        let mut uow = store.begin().await.unwrap();
        let err = uow
            .write_status(ItemId::new(1), ItemStatus::SoldOut)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::LockNotHeld(id) if id == ItemId::new(1)));
    }

    #[tokio::test]
    async fn dropping_an_open_unit_of_work_rolls_back_and_unlocks() {
        let store = InMemoryMarketStore::new().with_lock_timeout(Duration::from_millis(200));
        store.seed_item(on_sale(4)).unwrap();

        {
            let mut uow = store.begin().await.unwrap();
            uow.read_status_for_update(ItemId::new(4)).await.unwrap();
            uow.write_status(ItemId::new(4), ItemStatus::SoldOut).await.unwrap();
            uow.append(ItemId::new(4), UserId::new(9), Utc::now()).await.unwrap();
        }

        assert_eq!(status_of(&store, 4).await, ItemStatus::OnSale);
        assert!(store.all_purchases().unwrap().is_empty());

        let mut next = store.begin().await.unwrap();
        let status = next.read_status_for_update(ItemId::new(4)).await.unwrap();
        assert_eq!(status, Some(ItemStatus::OnSale));
    }

    #[tokio::test]
    async fn contended_lock_times_out() {
        let store = InMemoryMarketStore::new().with_lock_timeout(Duration::from_millis(30));
        store.seed_item(on_sale(5)).unwrap();

        let mut holder = store.begin().await.unwrap();
        holder.read_status_for_update(ItemId::new(5)).await.unwrap();

        let mut waiter = store.begin().await.unwrap();
        let err = waiter.read_status_for_update(ItemId::new(5)).await.unwrap_err();
        assert!(matches!(err, StoreError::LockTimeout(_)));
    }

    #[tokio::test]
    async fn zero_lock_timeout_waits_for_the_holder() {
        let store = InMemoryMarketStore::new().with_lock_timeout(Duration::ZERO);
        store.seed_item(on_sale(8)).unwrap();

        let mut holder = store.begin().await.unwrap();
        holder.read_status_for_update(ItemId::new(8)).await.unwrap();

        let waiter_store = store.clone();
        let waiter = tokio::spawn(async move {
            let mut uow = waiter_store.begin().await.unwrap();
            uow.read_status_for_update(ItemId::new(8)).await
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        holder.rollback().await.unwrap();
        assert_eq!(waiter.await.unwrap().unwrap(), Some(ItemStatus::OnSale));
    }

    #[tokio::test]
    async fn closed_unit_of_work_refuses_further_work() {
        let store = InMemoryMarketStore::new();
        store.seed_item(on_sale(6)).unwrap();

        let mut uow = store.begin().await.unwrap();
        uow.commit().await.unwrap();
        assert!(matches!(
            uow.read_status_for_update(ItemId::new(6)).await,
            Err(StoreError::TransactionClosed)
        ));
        assert!(matches!(uow.rollback().await, Err(StoreError::TransactionClosed)));
    }

    #[tokio::test]
    async fn missing_item_reads_as_none() {
        let store = InMemoryMarketStore::new();
        let mut uow = store.begin().await.unwrap();
        assert_eq!(uow.read_status_for_update(ItemId::new(999_999)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn created_items_continue_after_seeded_ids() {
        let store = InMemoryMarketStore::new();
        store.seed_item(on_sale(11)).unwrap();

        let new = NewItem::new(UserId::new(1), CategoryId::new(1), "Desk", 9000, "", "").unwrap();
        let created = store.create_item(new).await.unwrap();
        assert_eq!(created.id, ItemId::new(12));
        assert_eq!(created.status, ItemStatus::OnSale);

        let ids: Vec<i64> = store
            .list_items()
            .await
            .unwrap()
            .iter()
            .map(|l| l.item.id.get())
            .collect();
        assert_eq!(ids, vec![11, 12]);
    }

    #[tokio::test]
    async fn listings_carry_the_category_name() {
        let store = InMemoryMarketStore::new();
        let new = NewItem::new(UserId::new(1), CategoryId::new(2), "Radio", 3000, "", "").unwrap();
        store.create_item(new).await.unwrap();

        let listings = store.list_items().await.unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].category_name, "Electronics");
        assert_eq!(store.list_categories().await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn unknown_category_is_a_constraint_error() {
        let store = InMemoryMarketStore::new();
        let new = NewItem::new(UserId::new(1), CategoryId::new(999), "Radio", 3000, "", "").unwrap();
        let err = store.create_item(new).await.unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));
        assert!(store.list_items().await.unwrap().is_empty());
    }

    fn row_lock_entries(store: &InMemoryMarketStore) -> usize {
        store.shared.row_locks.lock().unwrap().len()
    }

    #[tokio::test]
    async fn row_locks_are_forgotten_once_released() {
        let store = InMemoryMarketStore::new().with_lock_timeout(Duration::from_millis(20));
        store.seed_item(on_sale(1)).unwrap();

        for id in 1_000..2_000 {
            let mut uow = store.begin().await.unwrap();
            assert_eq!(uow.read_status_for_update(ItemId::new(id)).await.unwrap(), None);
            uow.rollback().await.unwrap();
        }
        assert_eq!(row_lock_entries(&store), 0);

        // Commit and a plain drop release too.
        let mut uow = store.begin().await.unwrap();
        uow.read_status_for_update(ItemId::new(1)).await.unwrap();
        uow.commit().await.unwrap();
        {
            let mut uow = store.begin().await.unwrap();
            uow.read_status_for_update(ItemId::new(1)).await.unwrap();
        }
        assert_eq!(row_lock_entries(&store), 0);

        // A waiter that timed out leaves nothing behind once the holder is done.
        let mut holder = store.begin().await.unwrap();
        holder.read_status_for_update(ItemId::new(1)).await.unwrap();
        let mut waiter = store.begin().await.unwrap();
        assert!(waiter.read_status_for_update(ItemId::new(1)).await.is_err());
        assert_eq!(row_lock_entries(&store), 1);
        holder.rollback().await.unwrap();
        assert_eq!(row_lock_entries(&store), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn contended_row_lock_is_kept_while_waiters_remain() {
        let store = InMemoryMarketStore::new();
        store.seed_item(on_sale(2)).unwrap();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let mut uow = store.begin().await.unwrap();
                uow.read_status_for_update(ItemId::new(2)).await.unwrap();
                tokio::time::sleep(Duration::from_millis(2)).await;
                uow.rollback().await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(row_lock_entries(&store), 0);
    }

    #[tokio::test]
    async fn users_are_found_by_exact_name() {
        let store = InMemoryMarketStore::new();
        store.register(NewUser::new("taro", 30).unwrap()).await.unwrap();
        store.register(NewUser::new("taro", 41).unwrap()).await.unwrap();
        store.register(NewUser::new("hanako", 25).unwrap()).await.unwrap();

        let found = store.find_by_name("taro").await.unwrap();
        assert_eq!(found.len(), 2);
        assert!(store.find_by_name("tar").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn conversation_only_includes_the_pair_and_item() {
        let store = InMemoryMarketStore::new();
        let send = |item, from, to, text: &str| {
            NewMessage::new(ItemId::new(item), UserId::new(from), UserId::new(to), text).unwrap()
        };
        store.send(send(10, 1, 2, "is this available?")).await.unwrap();
        store.send(send(10, 2, 1, "yes")).await.unwrap();
        store.send(send(10, 1, 3, "other buyer")).await.unwrap();
        store.send(send(11, 1, 2, "other item")).await.unwrap();

        let conv = store
            .conversation(ItemId::new(10), UserId::new(2), UserId::new(1))
            .await
            .unwrap();
        let contents: Vec<&str> = conv.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["is this available?", "yes"]);
    }
}
