//! Capability traits for voters and votables.
//!
//! Instances implement [`VoteParticipant`] for polymorphic resolution, and
//! each participating kind registers a handle implementing [`VoterKind`]
//! and/or [`VotableKind`].

use crate::error::VoteResult;
use crate::id::EntityId;
use crate::tag::TypeTag;

/// Implemented by any concrete entity instance that can stand on either
/// side of a vote.
pub trait VoteParticipant {
    /// Type tag of this instance's concrete kind.
    fn type_tag(&self) -> TypeTag;

    /// Persisted identifier, or `None` if the instance was never persisted.
    ///
    /// An instance without an identifier must be rejected before any vote
    /// record is written.
    fn identifier(&self) -> Option<EntityId>;
}

/// Capability handle for an entity kind that casts votes.
pub trait VoterKind: Send + Sync {
    /// Type tag this handle serves.
    fn type_tag(&self) -> TypeTag;
}

/// Capability handle for an entity kind that receives votes and holds a
/// cached aggregate field.
pub trait VotableKind: Send + Sync {
    /// Type tag this handle serves.
    fn type_tag(&self) -> TypeTag;

    /// Recalculate the cached aggregate for one votable instance.
    ///
    /// Invoked synchronously once per vote creation (`increment = true`)
    /// and once per vote removal (`increment = false`). How the cached
    /// value is computed is the implementation's business; this trait only
    /// fixes when and with what signal the hook fires.
    fn recalculate_cache(&self, votable_id: EntityId, increment: bool) -> VoteResult<()>;
}

impl std::fmt::Debug for dyn VotableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VotableKind")
            .field("type_tag", &self.type_tag())
            .finish()
    }
}

impl<K> VoterKind for std::sync::Arc<K>
where
    K: VoterKind + ?Sized,
{
    fn type_tag(&self) -> TypeTag {
        (**self).type_tag()
    }
}

impl<K> VotableKind for std::sync::Arc<K>
where
    K: VotableKind + ?Sized,
{
    fn type_tag(&self) -> TypeTag {
        (**self).type_tag()
    }

    fn recalculate_cache(&self, votable_id: EntityId, increment: bool) -> VoteResult<()> {
        (**self).recalculate_cache(votable_id, increment)
    }
}
