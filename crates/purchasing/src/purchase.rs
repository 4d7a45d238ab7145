use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bazaar_core::{DomainError, Entity, ItemId, PurchaseId, UserId};

/// A completed purchase, as appended to the transaction log.
///
/// Records are immutable once written and never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub id: PurchaseId,
    pub item_id: ItemId,
    pub buyer_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl Entity for PurchaseRecord {
    type Id = PurchaseId;

    fn id(&self) -> PurchaseId {
        self.id
    }
}

/// Inbound purchase request after shape validation.
///
/// Construction is the only place the "both identifiers present" rule is
/// checked; the coordinator receives already well-formed identifiers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PurchaseRequest {
    item_id: ItemId,
    buyer_id: UserId,
}

impl PurchaseRequest {
    pub fn new(item_id: i64, buyer_id: i64) -> Result<Self, DomainError> {
        if item_id == 0 || buyer_id == 0 {
            return Err(DomainError::validation("item_id and buyer_id are required"));
        }
        let item_id = ItemId::parse_valid(item_id)?;
        let buyer_id = UserId::parse_valid(buyer_id)?;
        Ok(Self { item_id, buyer_id })
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn buyer_id(&self) -> UserId {
        self.buyer_id
    }
}
