//! Vote storage boundary.
//!
//! This module defines an infrastructure-facing abstraction for persisting
//! and querying vote records without making any storage assumptions.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryVoteStore;
pub use r#trait::{StoreError, VoteStore};
