use std::sync::Arc;

use thiserror::Error;

use plaudit_votes::{Vote, VoteFilter, VoteSubject};

/// Vote store operation error.
///
/// These are **infrastructure errors** (storage access, backend faults) as
/// opposed to domain errors (resolution, registration). They propagate to
/// callers unchanged; no retries happen inside the engine.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend failure: {0}")]
    Backend(String),

    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

/// Generic CRUD over vote records, parameterized by type tag + id pairs
/// rather than concrete entity types.
///
/// ## Predicate Contract
///
/// Queries and bulk deletes take a [`VoteFilter`]: a conjunction of
/// equality terms over the four subject fields. Any row store can compile
/// this to a plain `WHERE a = x AND b = y` clause.
///
/// ## Ordering
///
/// `query_all` returns records in insertion order of the underlying store;
/// no additional sort guarantee is provided.
///
/// ## Implementation Requirements
///
/// Implementations must:
/// - assign the surrogate `VoteId` and both timestamps at insert
/// - treat every operation as one synchronous unit of work
/// - preserve insertion order across queries
pub trait VoteStore: Send + Sync {
    /// Insert a new vote record.
    ///
    /// Does not itself check for duplicates; uniqueness of the
    /// (voter, votable) pair is the caller's policy.
    fn insert(&self, voter: VoteSubject, votable: VoteSubject) -> Result<Vote, StoreError>;

    /// First record matching the filter, in insertion order.
    fn query_one(&self, filter: &VoteFilter) -> Result<Option<Vote>, StoreError>;

    /// All records matching the filter, in insertion order.
    fn query_all(&self, filter: &VoteFilter) -> Result<Vec<Vote>, StoreError>;

    /// Delete one record, addressed by its surrogate id.
    ///
    /// Deleting a record that is already gone is a no-op.
    fn delete(&self, vote: &Vote) -> Result<(), StoreError>;

    /// Delete every record matching the filter.
    fn delete_all(&self, filter: &VoteFilter) -> Result<(), StoreError>;
}

impl<S> VoteStore for Arc<S>
where
    S: VoteStore + ?Sized,
{
    fn insert(&self, voter: VoteSubject, votable: VoteSubject) -> Result<Vote, StoreError> {
        (**self).insert(voter, votable)
    }

    fn query_one(&self, filter: &VoteFilter) -> Result<Option<Vote>, StoreError> {
        (**self).query_one(filter)
    }

    fn query_all(&self, filter: &VoteFilter) -> Result<Vec<Vote>, StoreError> {
        (**self).query_all(filter)
    }

    fn delete(&self, vote: &Vote) -> Result<(), StoreError> {
        (**self).delete(vote)
    }

    fn delete_all(&self, filter: &VoteFilter) -> Result<(), StoreError> {
        (**self).delete_all(filter)
    }
}
