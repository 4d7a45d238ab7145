//! Messaging domain module: per-item conversations between two users.

pub mod message;

pub use message::{Message, NewMessage, sort_conversation};
