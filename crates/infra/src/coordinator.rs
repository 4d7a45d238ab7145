//! Purchase coordinator (application-level orchestration).
//!
//! ```text
//! purchase(item, buyer)
//!   ↓
//! 1. begin unit of work
//!   ↓
//! 2. read item status, taking the item's exclusive lock
//!   ↓
//! 3. missing → NotFound, ON_SALE → SOLD_OUT refused → AlreadySold (rolled back)
//!   ↓
//! 4. write SOLD_OUT
//!   ↓
//! 5. append purchase record
//!   ↓
//! 6. commit
//! ```
//!
//! Any storage failure in steps 1, 2, 4, 5 or 6 rolls the unit of work back and
//! surfaces as `PurchaseError::TransactionFailed`. The coordinator holds no
//! lock of its own; the item lock comes from the store and lives exactly as
//! long as the unit of work.

use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use bazaar_catalog::ItemStatus;
use bazaar_core::{ItemId, UserId};
use bazaar_purchasing::{PurchaseError, PurchaseRecord};

use crate::retry::RetryPolicy;
use crate::store::{ItemStore, PurchaseStore, StoreError, TransactionLog, UnitOfWork};

/// Runs purchases against a [`PurchaseStore`].
#[derive(Debug, Clone)]
pub struct PurchaseCoordinator<S> {
    store: S,
}

impl<S> PurchaseCoordinator<S>
where
    S: PurchaseStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Sell `item_id` to `buyer_id` exactly once.
    ///
    /// Identifiers are assumed well-formed (see `PurchaseRequest`).
    #[instrument(skip(self), fields(item_id = %item_id, buyer_id = %buyer_id))]
    pub async fn purchase(
        &self,
        item_id: ItemId,
        buyer_id: UserId,
    ) -> Result<PurchaseRecord, PurchaseError> {
        let mut uow = self
            .store
            .begin()
            .await
            .map_err(|e| infra_failure("begin", e))?;

        match run(uow.as_mut(), item_id, buyer_id).await {
            Ok(record) => {
                info!(purchase_id = %record.id, "item sold");
                Ok(record)
            }
            Err(err) => {
                abandon(uow.as_mut()).await;
                match &err {
                    PurchaseError::TransactionFailed(_) => {}
                    rejected => debug!(reason = rejected.code(), "purchase rejected"),
                }
                Err(err)
            }
        }
    }

    /// Like [`purchase`](Self::purchase), re-running the whole unit of work
    /// after `TransactionFailed` while `policy` allows it.
    pub async fn purchase_with_retry(
        &self,
        item_id: ItemId,
        buyer_id: UserId,
        policy: &RetryPolicy,
    ) -> Result<PurchaseRecord, PurchaseError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.purchase(item_id, buyer_id).await {
                Err(err) if err.is_retryable() && policy.should_retry(attempt) => {
                    let delay = policy.delay_for_attempt(attempt);
                    warn!(
                        item_id = %item_id,
                        buyer_id = %buyer_id,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "retrying purchase"
                    );
                    tokio::time::sleep(delay).await;
                }
                outcome => return outcome,
            }
        }
    }
}

async fn run(
    uow: &mut dyn UnitOfWork,
    item_id: ItemId,
    buyer_id: UserId,
) -> Result<PurchaseRecord, PurchaseError> {
    let status = uow
        .read_status_for_update(item_id)
        .await
        .map_err(|e| infra_failure("read_status_for_update", e))?;

    let current = status.ok_or(PurchaseError::NotFound(item_id))?;
    let next = current
        .transition_to(ItemStatus::SoldOut)
        .map_err(|e| PurchaseError::from_transition(item_id, e))?;

    uow.write_status(item_id, next)
        .await
        .map_err(|e| infra_failure("write_status", e))?;

    let record = uow
        .append(item_id, buyer_id, Utc::now())
        .await
        .map_err(|e| infra_failure("append", e))?;

    uow.commit()
        .await
        .map_err(|e| infra_failure("commit", e))?;

    Ok(record)
}

/// Roll back whatever is still open. A unit of work that failed inside commit
/// is already closed; anything else is logged and dropped (drop rolls back).
async fn abandon(uow: &mut dyn UnitOfWork) {
    match uow.rollback().await {
        Ok(()) | Err(StoreError::TransactionClosed) => {}
        Err(e) => warn!(error = %e, "rollback failed"),
    }
}

fn infra_failure(step: &'static str, err: StoreError) -> PurchaseError {
    warn!(step, error = %err, "purchase transaction failed");
    PurchaseError::transaction_failed(format!("{step}: {err}"))
}
