//! Cascade cleanup when a participating entity is deleted.
//!
//! The deletion itself is performed by the persistence collaborator; this
//! component reacts to its outcome. Ordering contract: affected votables
//! are recalculated against the pre-deletion vote set — read the votes,
//! recalculate, then bulk-delete — so a concurrent read never observes a
//! vote that is about to vanish with a cache not yet adjusted.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use plaudit_votes::{DeletionOutcome, TypeRegistry, VoteFilter};

use crate::cache::CacheUpdater;
use crate::service::VotingError;
use crate::vote_store::VoteStore;

/// Cascades vote deletion and cache maintenance after entity deletions.
#[derive(Debug)]
pub struct CleanupCoordinator<S> {
    store: S,
    cache: CacheUpdater,
}

impl<S> CleanupCoordinator<S> {
    pub fn new(registry: Arc<TypeRegistry>, store: S) -> Self {
        Self {
            store,
            cache: CacheUpdater::new(registry),
        }
    }
}

impl<S> CleanupCoordinator<S>
where
    S: VoteStore,
{
    /// React to the deletion of a voter entity.
    ///
    /// On a successful deletion: reads all votes the voter cast,
    /// decrements each distinct affected votable exactly once (first-seen
    /// order, even when several votes target the same votable), then
    /// bulk-deletes the voter's records. A failed deletion passes through
    /// unchanged with no side effects.
    pub fn cleanup_votes(&self, outcome: DeletionOutcome) -> Result<DeletionOutcome, VotingError> {
        let subject = match &outcome {
            DeletionOutcome::Deleted { subject } => subject.clone(),
            DeletionOutcome::Failed { .. } => return Ok(outcome),
        };

        let filter = VoteFilter::by_voter(&subject);
        let votes = self.store.query_all(&filter)?;

        let mut seen = HashSet::new();
        for vote in &votes {
            if seen.insert(vote.votable.clone()) {
                self.cache.recalculate(&vote.votable, false)?;
            }
        }

        debug!(
            voter = %subject,
            votes = votes.len(),
            distinct_votables = seen.len(),
            "cascading voter cleanup"
        );
        self.store.delete_all(&filter)?;

        Ok(outcome)
    }

    /// React to the deletion of a votable entity.
    ///
    /// Bulk-deletes every vote referencing it. No recalculation is made:
    /// the votable, and with it the cached field, no longer exists.
    pub fn cleanup_votable(
        &self,
        outcome: DeletionOutcome,
    ) -> Result<DeletionOutcome, VotingError> {
        let subject = match &outcome {
            DeletionOutcome::Deleted { subject } => subject.clone(),
            DeletionOutcome::Failed { .. } => return Ok(outcome),
        };

        debug!(votable = %subject, "cascading votable cleanup");
        self.store.delete_all(&VoteFilter::by_votable(&subject))?;

        Ok(outcome)
    }
}
