//! Catalog domain module.
//!
//! Listed items with their categories, prices and one-way sale lifecycle.
//! Pure domain logic: no IO, no HTTP, no storage.

pub mod item;

pub use item::{Category, DEFAULT_CATEGORIES, Item, ItemListing, ItemStatus, NewItem, Price};
