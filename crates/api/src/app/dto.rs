use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bazaar_catalog::{Category, Item, ItemListing};
use bazaar_messaging::Message;
use bazaar_purchasing::PurchaseRecord;
use bazaar_users::User;

// -------------------------
// Request DTOs
// -------------------------

/// Missing identifiers deserialize as `0` and are rejected as validation errors.
#[derive(Debug, Deserialize)]
pub struct PurchaseRequestBody {
    #[serde(default)]
    pub item_id: i64,
    #[serde(default)]
    pub buyer_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct PurchasesQuery {
    pub item_id: Option<i64>,
    pub buyer_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    #[serde(default)]
    pub seller_id: i64,
    #[serde(default)]
    pub category_id: i64,
    pub name: String,
    pub price: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_name: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterUserRequest {
    pub name: String,
    pub age: i32,
}

#[derive(Debug, Deserialize)]
pub struct SearchUsersQuery {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub item_id: i64,
    #[serde(default)]
    pub sender_id: i64,
    #[serde(default)]
    pub receiver_id: i64,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ConversationQuery {
    #[serde(default)]
    pub item_id: i64,
    #[serde(default)]
    pub user_id: i64,
    #[serde(default)]
    pub partner_id: i64,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub id: i64,
    pub seller_id: i64,
    pub category_id: i64,
    pub name: String,
    pub price: i64,
    pub description: String,
    pub image_name: String,
    pub status: &'static str,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id.get(),
            seller_id: item.seller_id.get(),
            category_id: item.category_id.get(),
            name: item.name,
            price: item.price.amount(),
            description: item.description,
            image_name: item.image_name,
            status: item.status.as_str(),
        }
    }
}

/// An item in `GET /items`, with its category name.
#[derive(Debug, Serialize)]
pub struct ListingResponse {
    #[serde(flatten)]
    pub item: ItemResponse,
    pub category_name: String,
}

impl From<ItemListing> for ListingResponse {
    fn from(listing: ItemListing) -> Self {
        Self {
            item: ItemResponse::from(listing.item),
            category_name: listing.category_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.get(),
            name: category.name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PurchaseResponse {
    pub id: i64,
    pub item_id: i64,
    pub buyer_id: i64,
    pub created_at: DateTime<Utc>,
}

impl From<PurchaseRecord> for PurchaseResponse {
    fn from(record: PurchaseRecord) -> Self {
        Self {
            id: record.id.get(),
            item_id: record.item_id.get(),
            buyer_id: record.buyer_id.get(),
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub registered_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.get(),
            name: user.name,
            age: user.age,
            registered_at: user.registered_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub id: i64,
    pub item_id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            id: message.id.get(),
            item_id: message.item_id.get(),
            sender_id: message.sender_id.get(),
            receiver_id: message.receiver_id.get(),
            content: message.content,
            created_at: message.created_at,
        }
    }
}
