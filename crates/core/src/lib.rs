//! `plaudit-core` — domain foundation for the polymorphic voting engine.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;
pub mod participant;
pub mod tag;

pub use error::{VoteError, VoteResult};
pub use id::{EntityId, VoteId};
pub use participant::{VotableKind, VoteParticipant, VoterKind};
pub use tag::TypeTag;
