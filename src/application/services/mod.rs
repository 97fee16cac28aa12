//! Service implementations.

pub mod link_registry;

pub use link_registry::LinkRegistry;
