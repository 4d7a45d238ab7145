//! Purchasing domain module.
//!
//! Purchase records, request shape validation and the purchase outcome
//! taxonomy. The transactional purchase itself lives in the infra crate's
//! coordinator; this crate stays pure (no IO, no HTTP, no storage).

pub mod error;
pub mod purchase;

pub use error::PurchaseError;
pub use purchase::{PurchaseRecord, PurchaseRequest};
