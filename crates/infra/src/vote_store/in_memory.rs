use std::sync::RwLock;

use chrono::Utc;

use plaudit_core::VoteId;
use plaudit_votes::{Vote, VoteFilter, VoteSubject};

use super::r#trait::{StoreError, VoteStore};

/// In-memory vote store.
///
/// Intended for tests/dev. Preserves insertion order. Not optimized for
/// performance.
#[derive(Debug, Default)]
pub struct InMemoryVoteStore {
    votes: RwLock<Vec<Vote>>,
}

impl InMemoryVoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of records, regardless of filter.
    pub fn len(&self) -> usize {
        self.votes.read().map(|v| v.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl VoteStore for InMemoryVoteStore {
    fn insert(&self, voter: VoteSubject, votable: VoteSubject) -> Result<Vote, StoreError> {
        let now = Utc::now();
        let vote = Vote {
            id: VoteId::new(),
            voter,
            votable,
            created_at: now,
            updated_at: now,
        };

        let mut votes = self
            .votes
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        votes.push(vote.clone());

        Ok(vote)
    }

    fn query_one(&self, filter: &VoteFilter) -> Result<Option<Vote>, StoreError> {
        let votes = self
            .votes
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        Ok(votes.iter().find(|v| filter.matches(v)).cloned())
    }

    fn query_all(&self, filter: &VoteFilter) -> Result<Vec<Vote>, StoreError> {
        let votes = self
            .votes
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        Ok(votes.iter().filter(|v| filter.matches(v)).cloned().collect())
    }

    fn delete(&self, vote: &Vote) -> Result<(), StoreError> {
        let mut votes = self
            .votes
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        votes.retain(|v| v.id != vote.id);

        Ok(())
    }

    fn delete_all(&self, filter: &VoteFilter) -> Result<(), StoreError> {
        let mut votes = self
            .votes
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        votes.retain(|v| !filter.matches(v));

        Ok(())
    }
}
