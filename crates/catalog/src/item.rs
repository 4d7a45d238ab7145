use core::str::FromStr;

use serde::{Deserialize, Serialize};

use bazaar_core::{CategoryId, DomainError, Entity, ItemId, UserId, ValueObject};

/// Sale lifecycle of an item.
///
/// The only legal transition is `OnSale -> SoldOut`, performed once, by a
/// successful purchase.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemStatus {
    #[serde(rename = "ON_SALE")]
    OnSale,
    #[serde(rename = "SOLD_OUT")]
    SoldOut,
}

impl ItemStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemStatus::OnSale => "ON_SALE",
            ItemStatus::SoldOut => "SOLD_OUT",
        }
    }

    /// Validate a transition to `next`.
    pub fn transition_to(self, next: ItemStatus) -> Result<ItemStatus, DomainError> {
        match (self, next) {
            (ItemStatus::OnSale, ItemStatus::SoldOut) => Ok(next),
            (ItemStatus::SoldOut, ItemStatus::SoldOut) => {
                Err(DomainError::conflict("item is already sold out"))
            }
            (from, to) => Err(DomainError::invariant(format!(
                "illegal status transition {} -> {}",
                from.as_str(),
                to.as_str()
            ))),
        }
    }
}

impl core::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ON_SALE" => Ok(ItemStatus::OnSale),
            "SOLD_OUT" => Ok(ItemStatus::SoldOut),
            other => Err(DomainError::validation(format!("unknown item status '{other}'"))),
        }
    }
}

/// Price in the smallest currency unit. Always positive.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Price(i64);

impl Price {
    pub fn new(amount: i64) -> Result<Self, DomainError> {
        if amount <= 0 {
            return Err(DomainError::validation("price must be a positive integer"));
        }
        Ok(Self(amount))
    }

    pub fn amount(self) -> i64 {
        self.0
    }
}

impl ValueObject for Price {}

impl TryFrom<i64> for Price {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Price::new(value)
    }
}

impl From<Price> for i64 {
    fn from(value: Price) -> Self {
        value.0
    }
}

/// Categories every store starts with.
pub const DEFAULT_CATEGORIES: &[(i64, &str)] = &[
    (1, "Books"),
    (2, "Electronics"),
    (3, "Fashion"),
    (4, "Home"),
    (5, "Hobbies"),
    (6, "Other"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    pub fn defaults() -> Vec<Category> {
        DEFAULT_CATEGORIES
            .iter()
            .map(|(id, name)| Category {
                id: CategoryId::new(*id),
                name: (*name).to_string(),
            })
            .collect()
    }
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> CategoryId {
        self.id
    }
}

/// An item joined with its category name, as shown in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemListing {
    pub item: Item,
    pub category_name: String,
}

/// A listed item as stored by the item store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub seller_id: UserId,
    pub category_id: CategoryId,
    pub name: String,
    pub price: Price,
    pub description: String,
    pub image_name: String,
    pub status: ItemStatus,
}

impl Item {
    /// Materialize a validated listing under the id assigned by the store.
    pub fn from_new(id: ItemId, new: NewItem) -> Self {
        Self {
            id,
            seller_id: new.seller_id,
            category_id: new.category_id,
            name: new.name,
            price: new.price,
            description: new.description,
            image_name: new.image_name,
            status: ItemStatus::OnSale,
        }
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> ItemId {
        self.id
    }
}

/// A validated listing request, not yet stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    seller_id: UserId,
    category_id: CategoryId,
    name: String,
    price: Price,
    description: String,
    image_name: String,
}

impl NewItem {
    pub fn new(
        seller_id: UserId,
        category_id: CategoryId,
        name: impl Into<String>,
        price: i64,
        description: impl Into<String>,
        image_name: impl Into<String>,
    ) -> Result<Self, DomainError> {
        if !seller_id.is_valid() {
            return Err(DomainError::invalid_id("seller_id is required"));
        }
        if !category_id.is_valid() {
            return Err(DomainError::invalid_id("category_id is required"));
        }
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        let price = Price::new(price)?;

        Ok(Self {
            seller_id,
            category_id,
            name: name.trim().to_string(),
            price,
            description: description.into(),
            image_name: image_name.into(),
        })
    }

    pub fn seller_id(&self) -> UserId {
        self.seller_id
    }

    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn image_name(&self) -> &str {
        &self.image_name
    }
}
