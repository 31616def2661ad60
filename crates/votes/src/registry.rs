//! Explicit capability registry.
//!
//! The participating set of entity kinds is declared once at startup
//! through [`TypeRegistryBuilder`] and frozen, which keeps it explicit,
//! testable, and free of process-wide implicit state.

use std::collections::HashMap;
use std::sync::Arc;

use plaudit_core::{TypeTag, VotableKind, VoteError, VoteResult, VoterKind};

/// Immutable mapping from type tag to capability handle.
///
/// Never mutated after [`TypeRegistryBuilder::build`], so shared references
/// are safe for concurrent reads without locking.
#[derive(Default)]
pub struct TypeRegistry {
    voters: HashMap<TypeTag, Arc<dyn VoterKind>>,
    votables: HashMap<TypeTag, Arc<dyn VotableKind>>,
}

impl TypeRegistry {
    pub fn builder() -> TypeRegistryBuilder {
        TypeRegistryBuilder::default()
    }

    /// Handles of every kind registered as a voter.
    pub fn voters(&self) -> impl Iterator<Item = &Arc<dyn VoterKind>> {
        self.voters.values()
    }

    /// Handles of every kind registered as a votable.
    pub fn votables(&self) -> impl Iterator<Item = &Arc<dyn VotableKind>> {
        self.votables.values()
    }

    /// Look up the voter handle for a tag.
    pub fn lookup_voter(&self, tag: &TypeTag) -> VoteResult<&Arc<dyn VoterKind>> {
        self.voters
            .get(tag)
            .ok_or_else(|| VoteError::unregistered(tag.clone()))
    }

    /// Look up the votable handle for a tag.
    pub fn lookup_votable(&self, tag: &TypeTag) -> VoteResult<&Arc<dyn VotableKind>> {
        self.votables
            .get(tag)
            .ok_or_else(|| VoteError::unregistered(tag.clone()))
    }

    pub fn is_voter(&self, tag: &TypeTag) -> bool {
        self.voters.contains_key(tag)
    }

    pub fn is_votable(&self, tag: &TypeTag) -> bool {
        self.votables.contains_key(tag)
    }
}

impl core::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("voters", &self.voters.keys().collect::<Vec<_>>())
            .field("votables", &self.votables.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Collects capability registrations; `build` freezes the registry.
///
/// Registering the same tag twice replaces the earlier handle (last
/// registration wins). A kind may be registered under both capabilities.
#[derive(Default)]
pub struct TypeRegistryBuilder {
    voters: HashMap<TypeTag, Arc<dyn VoterKind>>,
    votables: HashMap<TypeTag, Arc<dyn VotableKind>>,
}

impl TypeRegistryBuilder {
    pub fn register_voter(mut self, handle: Arc<dyn VoterKind>) -> Self {
        self.voters.insert(handle.type_tag(), handle);
        self
    }

    pub fn register_votable(mut self, handle: Arc<dyn VotableKind>) -> Self {
        self.votables.insert(handle.type_tag(), handle);
        self
    }

    pub fn build(self) -> TypeRegistry {
        TypeRegistry {
            voters: self.voters,
            votables: self.votables,
        }
    }
}
