//! Persistence gateway adapters.
//!
//! The core treats durable storage as an external collaborator behind
//! the ports in [`crate::domain::ports`]; these in-memory adapters are
//! the gateway used for local development and tests. They own the
//! uniqueness rules the ports document — duplicate emails and category
//! names are rejected here, not in the domain services.

pub mod memory;
#[cfg(feature = "example-data")]
pub mod seed;

pub use memory::{InMemoryCategoryRepository, InMemoryComponentRepository, InMemoryUserRepository};
