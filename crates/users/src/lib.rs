//! User directory domain module.
//!
//! Registration rules and the stored user shape. Authentication and sessions
//! are out of scope; a user here is only an identity that can sell, buy and
//! send messages.

pub mod user;

pub use user::{NewUser, User};
