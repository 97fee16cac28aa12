//! Store trait definition for the domain layer.
//!
//! The trait defines the contract the registry consumes; concrete
//! implementations live in `crate::infrastructure::store`. A mock
//! implementation is auto-generated via `mockall` for unit tests.

pub mod key_value_store;

pub use key_value_store::{KeyValueStore, StoreError, StoreResult};

#[cfg(test)]
pub use key_value_store::MockKeyValueStore;
