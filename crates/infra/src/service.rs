//! Public operation surface of the voting engine.
//!
//! [`VotingService`] composes the polymorphic resolver, the capability
//! registry, the vote store, and the cache updater into the operations
//! calling application code consumes. Within one operation, steps are
//! strictly sequential: resolve → record change → recalculate. Across
//! concurrent operations on the same votable no isolation is provided;
//! two overlapping `vote_by` calls can lose a cache increment. Closing
//! that gap requires a transaction or atomic increment at the storage
//! layer, which the in-memory collaborator does not model.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use plaudit_core::{TypeTag, VoteError, VoteParticipant};
use plaudit_votes::{TypeRegistry, Vote, VoteFilter, resolve};

use crate::cache::CacheUpdater;
use crate::vote_store::{StoreError, VoteStore};

/// Operation-surface error: domain failures plus propagated store failures.
#[derive(Debug, Error)]
pub enum VotingError {
    /// An entity kind was never registered for the required capability.
    #[error("type '{0}' is not registered for this capability")]
    UnregisteredType(TypeTag),

    /// An entity instance has no persisted identifier.
    #[error("instance of '{0}' has no persisted identifier")]
    MissingIdentifier(TypeTag),

    /// `unvote_by` was requested on a pair with no existing vote record.
    #[error("no matching vote exists")]
    VoteNotFound,

    /// The voter already holds a vote on this votable.
    #[error("duplicate vote for this (voter, votable) pair")]
    DuplicateVote,

    /// An identifier failed to parse.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The recalculation hook failed after the vote write. The record
    /// stands; the cached aggregate may be stale.
    #[error("cache recalculation failed: {0}")]
    CacheRecalculation(String),

    /// Persistence failure, surfaced unchanged.
    #[error("store failure: {0}")]
    Store(#[from] StoreError),
}

impl From<VoteError> for VotingError {
    fn from(value: VoteError) -> Self {
        match value {
            VoteError::UnregisteredType(tag) => VotingError::UnregisteredType(tag),
            VoteError::MissingIdentifier(tag) => VotingError::MissingIdentifier(tag),
            VoteError::VoteNotFound => VotingError::VoteNotFound,
            VoteError::DuplicateVote => VotingError::DuplicateVote,
            VoteError::InvalidId(msg) => VotingError::InvalidId(msg),
            VoteError::CacheRecalculation(msg) => VotingError::CacheRecalculation(msg),
        }
    }
}

/// Voting operations over any registered (voter, votable) kind pair.
///
/// Generic over the store so tests run against [`crate::InMemoryVoteStore`]
/// and production can plug a real backend without touching domain code.
#[derive(Debug)]
pub struct VotingService<S> {
    registry: Arc<TypeRegistry>,
    store: S,
    cache: CacheUpdater,
}

impl<S> VotingService<S> {
    pub fn new(registry: Arc<TypeRegistry>, store: S) -> Self {
        let cache = CacheUpdater::new(registry.clone());
        Self {
            registry,
            store,
            cache,
        }
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S> VotingService<S>
where
    S: VoteStore,
{
    /// Cast a vote by `voter` on `votable`.
    ///
    /// Resolves both ends (rejecting unpersisted instances before any
    /// write), requires both kinds to carry the matching capability,
    /// enforces one vote per (voter, votable) pair, inserts the record,
    /// then recalculates the votable's cached aggregate.
    pub fn vote_by(
        &self,
        votable: &dyn VoteParticipant,
        voter: &dyn VoteParticipant,
    ) -> Result<Vote, VotingError> {
        let votable_subject = resolve(votable)?;
        let voter_subject = resolve(voter)?;

        self.registry.lookup_voter(&voter_subject.type_tag)?;
        self.registry.lookup_votable(&votable_subject.type_tag)?;

        let filter = VoteFilter::exact(&voter_subject, &votable_subject);
        if self.store.query_one(&filter)?.is_some() {
            return Err(VotingError::DuplicateVote);
        }

        let vote = self.store.insert(voter_subject, votable_subject.clone())?;
        debug!(voter = %vote.voter, votable = %vote.votable, "vote recorded");

        self.cache.recalculate(&votable_subject, true)?;
        Ok(vote)
    }

    /// Remove the vote cast by `voter` on `votable`.
    ///
    /// Fails with [`VotingError::VoteNotFound`] when no matching record
    /// exists; removal is a hard failure, not a silent no-op. On success
    /// the votable's cached aggregate is recalculated with a decrement
    /// signal.
    pub fn unvote_by(
        &self,
        votable: &dyn VoteParticipant,
        voter: &dyn VoteParticipant,
    ) -> Result<(), VotingError> {
        let votable_subject = resolve(votable)?;
        let voter_subject = resolve(voter)?;

        let filter = VoteFilter::exact(&voter_subject, &votable_subject);
        let vote = self
            .store
            .query_one(&filter)?
            .ok_or(VotingError::VoteNotFound)?;

        self.store.delete(&vote)?;
        debug!(voter = %vote.voter, votable = %vote.votable, "vote removed");

        self.cache.recalculate(&votable_subject, false)?;
        Ok(())
    }

    /// All votes received by one votable, in insertion order.
    pub fn votes_for(&self, votable: &dyn VoteParticipant) -> Result<Vec<Vote>, VotingError> {
        let subject = resolve(votable)?;
        Ok(self.store.query_all(&VoteFilter::by_votable(&subject))?)
    }

    /// All votes cast by one voter, across all votable kinds, in insertion
    /// order. Each returned record carries both full subjects.
    pub fn votes_by(&self, voter: &dyn VoteParticipant) -> Result<Vec<Vote>, VotingError> {
        let subject = resolve(voter)?;
        Ok(self.store.query_all(&VoteFilter::by_voter(&subject))?)
    }

    /// Whether `voter` currently holds a vote on `votable`.
    pub fn voted_for(
        &self,
        voter: &dyn VoteParticipant,
        votable: &dyn VoteParticipant,
    ) -> Result<bool, VotingError> {
        let voter_subject = resolve(voter)?;
        let votable_subject = resolve(votable)?;
        let filter = VoteFilter::exact(&voter_subject, &votable_subject);
        Ok(self.store.query_one(&filter)?.is_some())
    }
}
