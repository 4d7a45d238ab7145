//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**; two value objects holding the same
//! values are equal. `Price` in the catalog crate is the canonical example:
//! two prices of 1200 are the same price regardless of which item carries them.

/// Marker trait for immutable, value-compared domain objects.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
