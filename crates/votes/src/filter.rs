//! Predicate shape required of the persistence collaborator.

use serde::{Deserialize, Serialize};

use plaudit_core::{EntityId, TypeTag};

use crate::vote::{Vote, VoteSubject};

/// Conjunction of equality terms over the four vote subject fields.
///
/// Every term present must match; absent terms match anything. This is the
/// only predicate form the store contract requires, so backends can compile
/// it to a plain `WHERE a = x AND b = y` clause.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteFilter {
    pub voter_type: Option<TypeTag>,
    pub voter_id: Option<EntityId>,
    pub votable_type: Option<TypeTag>,
    pub votable_id: Option<EntityId>,
}

impl VoteFilter {
    /// All votes cast by one voter, across all votable kinds.
    pub fn by_voter(voter: &VoteSubject) -> Self {
        Self {
            voter_type: Some(voter.type_tag.clone()),
            voter_id: Some(voter.id),
            ..Self::default()
        }
    }

    /// All votes received by one votable.
    pub fn by_votable(votable: &VoteSubject) -> Self {
        Self {
            votable_type: Some(votable.type_tag.clone()),
            votable_id: Some(votable.id),
            ..Self::default()
        }
    }

    /// The single (voter, votable) pair.
    pub fn exact(voter: &VoteSubject, votable: &VoteSubject) -> Self {
        Self {
            voter_type: Some(voter.type_tag.clone()),
            voter_id: Some(voter.id),
            votable_type: Some(votable.type_tag.clone()),
            votable_id: Some(votable.id),
        }
    }

    /// Evaluate the conjunction against one record.
    pub fn matches(&self, vote: &Vote) -> bool {
        self.voter_type
            .as_ref()
            .is_none_or(|t| *t == vote.voter.type_tag)
            && self.voter_id.is_none_or(|id| id == vote.voter.id)
            && self
                .votable_type
                .as_ref()
                .is_none_or(|t| *t == vote.votable.type_tag)
            && self.votable_id.is_none_or(|id| id == vote.votable.id)
    }
}
