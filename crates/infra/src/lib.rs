//! Infrastructure layer: vote storage, cache maintenance, orchestration.

pub mod cache;
pub mod cleanup;
pub mod service;
pub mod vote_store;

pub use cache::CacheUpdater;
pub use cleanup::CleanupCoordinator;
pub use service::{VotingError, VotingService};
pub use vote_store::{InMemoryVoteStore, StoreError, VoteStore};

#[cfg(test)]
mod integration_tests;
