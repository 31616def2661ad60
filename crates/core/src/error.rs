//! Domain error model.

use thiserror::Error;

use crate::tag::TypeTag;

/// Result type used across the domain layer.
pub type VoteResult<T> = Result<T, VoteError>;

/// Domain-level error.
///
/// Keep this focused on deterministic voting failures (resolution,
/// registration, lookup). Storage concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VoteError {
    /// An entity kind was never registered as a voter or votable.
    #[error("type '{0}' is not registered for this capability")]
    UnregisteredType(TypeTag),

    /// An entity instance has no persisted identifier yet.
    #[error("instance of '{0}' has no persisted identifier")]
    MissingIdentifier(TypeTag),

    /// No vote record matches the requested (voter, votable) pair.
    #[error("no matching vote exists")]
    VoteNotFound,

    /// The voter already holds a vote on this votable.
    #[error("duplicate vote for this (voter, votable) pair")]
    DuplicateVote,

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A votable's cache recalculation hook failed.
    #[error("cache recalculation failed: {0}")]
    CacheRecalculation(String),
}

impl VoteError {
    pub fn unregistered(tag: TypeTag) -> Self {
        Self::UnregisteredType(tag)
    }

    pub fn missing_identifier(tag: TypeTag) -> Self {
        Self::MissingIdentifier(tag)
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn cache(msg: impl Into<String>) -> Self {
        Self::CacheRecalculation(msg.into())
    }
}
