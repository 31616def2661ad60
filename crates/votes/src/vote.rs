use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use plaudit_core::{EntityId, TypeTag, VoteId};

/// One end of a vote: an entity kind plus one persisted instance of it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoteSubject {
    pub type_tag: TypeTag,
    pub id: EntityId,
}

impl VoteSubject {
    pub fn new(type_tag: impl Into<TypeTag>, id: EntityId) -> Self {
        Self {
            type_tag: type_tag.into(),
            id,
        }
    }
}

impl core::fmt::Display for VoteSubject {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}#{}", self.type_tag, self.id)
    }
}

/// A persisted vote linking one voter instance to one votable instance.
///
/// Votes are created by `vote_by`, removed by `unvote_by`, or bulk-deleted
/// by cascade cleanup when either referenced entity is deleted. They are
/// never updated after creation except for `updated_at`.
///
/// The surrogate `id` is assigned by the store at insert and addresses a
/// concrete record for deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub id: VoteId,
    pub voter: VoteSubject,
    pub votable: VoteSubject,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vote {
    /// Whether this vote connects exactly the given (voter, votable) pair.
    pub fn links(&self, voter: &VoteSubject, votable: &VoteSubject) -> bool {
        &self.voter == voter && &self.votable == votable
    }
}
