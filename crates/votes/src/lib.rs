//! `plaudit-votes` — vote records, filters, and the capability registry.
//!
//! Domain layer of the polymorphic voting engine: the persisted [`Vote`]
//! record, the [`VoteFilter`] predicate shape required of the persistence
//! collaborator, the explicit [`TypeRegistry`], and instance resolution.

pub mod deletion;
pub mod filter;
pub mod registry;
pub mod resolver;
pub mod vote;

pub use deletion::DeletionOutcome;
pub use filter::VoteFilter;
pub use registry::{TypeRegistry, TypeRegistryBuilder};
pub use resolver::{resolve, type_tag_of};
pub use vote::{Vote, VoteSubject};
