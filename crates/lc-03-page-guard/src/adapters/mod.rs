//! Adapters for the backend port.

pub mod graphql;
pub mod memory;
pub mod queries;

pub use graphql::{GraphQlBackend, GraphQlConfig, DEFAULT_ENDPOINT};
pub use memory::InMemoryBackend;
