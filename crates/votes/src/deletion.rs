//! Deletion outcomes consumed by cascade cleanup.

use crate::vote::VoteSubject;

/// Outcome of an entity deletion performed by the persistence collaborator.
///
/// Cleanup gates on this structurally: only a successful deletion triggers
/// cascade work; a failed one is passed through unchanged with no side
/// effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionOutcome {
    /// The entity was deleted; `subject` identifies what is now gone.
    Deleted { subject: VoteSubject },
    /// The deletion failed upstream; the reason travels with the outcome.
    Failed { reason: String },
}

impl DeletionOutcome {
    pub fn deleted(subject: VoteSubject) -> Self {
        Self::Deleted { subject }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted { .. })
    }
}
