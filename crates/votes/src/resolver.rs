//! Polymorphic resolution of entity instances.

use plaudit_core::{TypeTag, VoteError, VoteParticipant, VoteResult};

use crate::vote::VoteSubject;

/// Derive the type tag of an instance's concrete kind.
pub fn type_tag_of(instance: &dyn VoteParticipant) -> TypeTag {
    instance.type_tag()
}

/// Resolve an instance to its (tag, id) vote subject.
///
/// Fails with `MissingIdentifier` when the instance was never persisted.
/// Callers must resolve before any write; proceeding without an identifier
/// would corrupt the vote record with a null reference.
pub fn resolve(instance: &dyn VoteParticipant) -> VoteResult<VoteSubject> {
    let tag = instance.type_tag();
    let id = instance
        .identifier()
        .ok_or_else(|| VoteError::missing_identifier(tag.clone()))?;
    Ok(VoteSubject::new(tag, id))
}
