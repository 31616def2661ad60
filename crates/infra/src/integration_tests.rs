//! Integration tests for the full voting pipeline.
//!
//! Tests: resolve → registry → store → cache recalculation → cleanup.
//!
//! Verifies:
//! - vote/unvote round trips and their cache signals
//! - hard failures (VoteNotFound, DuplicateVote, MissingIdentifier,
//!   UnregisteredType) before any write
//! - cascade cleanup ordering and exactly-once recalculation per distinct
//!   votable

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use plaudit_core::{EntityId, TypeTag, VotableKind, VoteError, VoteParticipant, VoteResult, VoterKind};
use plaudit_votes::{DeletionOutcome, TypeRegistry, VoteSubject};

use crate::cleanup::CleanupCoordinator;
use crate::service::{VotingError, VotingService};
use crate::vote_store::InMemoryVoteStore;

/// Minimal persisted-or-not entity instance.
struct TestEntity {
    tag: &'static str,
    id: Option<EntityId>,
}

impl TestEntity {
    fn persisted(tag: &'static str) -> Self {
        Self {
            tag,
            id: Some(EntityId::new()),
        }
    }

    fn unpersisted(tag: &'static str) -> Self {
        Self { tag, id: None }
    }

    fn subject(&self) -> VoteSubject {
        VoteSubject::new(self.tag, self.id.unwrap())
    }
}

impl VoteParticipant for TestEntity {
    fn type_tag(&self) -> TypeTag {
        TypeTag::new(self.tag)
    }

    fn identifier(&self) -> Option<EntityId> {
        self.id
    }
}

struct VoterHandle(&'static str);

impl VoterKind for VoterHandle {
    fn type_tag(&self) -> TypeTag {
        TypeTag::new(self.0)
    }
}

/// Votable handle that maintains a per-instance signed counter and records
/// every recalculation call.
struct CountingVotable {
    tag: &'static str,
    counts: Mutex<HashMap<EntityId, i64>>,
    calls: Mutex<Vec<(EntityId, bool)>>,
}

impl CountingVotable {
    fn new(tag: &'static str) -> Arc<Self> {
        Arc::new(Self {
            tag,
            counts: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn count(&self, id: EntityId) -> i64 {
        self.counts.lock().unwrap().get(&id).copied().unwrap_or(0)
    }

    fn calls(&self) -> Vec<(EntityId, bool)> {
        self.calls.lock().unwrap().clone()
    }
}

impl VotableKind for CountingVotable {
    fn type_tag(&self) -> TypeTag {
        TypeTag::new(self.tag)
    }

    fn recalculate_cache(&self, votable_id: EntityId, increment: bool) -> VoteResult<()> {
        self.calls.lock().unwrap().push((votable_id, increment));
        let delta = if increment { 1 } else { -1 };
        *self.counts.lock().unwrap().entry(votable_id).or_insert(0) += delta;
        Ok(())
    }
}

/// Votable handle whose recalculation hook always fails.
struct BrokenVotable;

impl VotableKind for BrokenVotable {
    fn type_tag(&self) -> TypeTag {
        TypeTag::new("Broken")
    }

    fn recalculate_cache(&self, _votable_id: EntityId, _increment: bool) -> VoteResult<()> {
        Err(VoteError::cache("hook unavailable"))
    }
}

struct Fixture {
    service: VotingService<Arc<InMemoryVoteStore>>,
    cleanup: CleanupCoordinator<Arc<InMemoryVoteStore>>,
    store: Arc<InMemoryVoteStore>,
    posts: Arc<CountingVotable>,
    comments: Arc<CountingVotable>,
}

fn setup() -> Fixture {
    let posts = CountingVotable::new("Post");
    let comments = CountingVotable::new("Comment");

    let registry = Arc::new(
        TypeRegistry::builder()
            .register_voter(Arc::new(VoterHandle("User")))
            .register_votable(posts.clone())
            .register_votable(comments.clone())
            .register_votable(Arc::new(BrokenVotable))
            .build(),
    );

    let store = Arc::new(InMemoryVoteStore::new());
    let service = VotingService::new(registry.clone(), store.clone());
    let cleanup = CleanupCoordinator::new(registry, store.clone());

    Fixture {
        service,
        cleanup,
        store,
        posts,
        comments,
    }
}

#[test]
fn vote_then_voted_for_returns_true() {
    let f = setup();
    let user = TestEntity::persisted("User");
    let post = TestEntity::persisted("Post");

    f.service.vote_by(&post, &user).unwrap();
    assert!(f.service.voted_for(&user, &post).unwrap());
}

#[test]
fn voted_for_is_false_for_a_different_voter() {
    let f = setup();
    let user = TestEntity::persisted("User");
    let other = TestEntity::persisted("User");
    let post = TestEntity::persisted("Post");

    f.service.vote_by(&post, &user).unwrap();
    assert!(!f.service.voted_for(&other, &post).unwrap());
}

#[test]
fn unvote_removes_the_record() {
    let f = setup();
    let user = TestEntity::persisted("User");
    let post = TestEntity::persisted("Post");

    f.service.vote_by(&post, &user).unwrap();
    f.service.unvote_by(&post, &user).unwrap();

    assert!(!f.service.voted_for(&user, &post).unwrap());
    assert!(f.store.is_empty());
}

#[test]
fn unvote_without_a_vote_fails_hard() {
    let f = setup();
    let user = TestEntity::persisted("User");
    let post = TestEntity::persisted("Post");

    let err = f.service.unvote_by(&post, &user).unwrap_err();
    assert!(matches!(err, VotingError::VoteNotFound));
}

#[test]
fn duplicate_vote_is_rejected_before_insert() {
    let f = setup();
    let user = TestEntity::persisted("User");
    let post = TestEntity::persisted("Post");

    f.service.vote_by(&post, &user).unwrap();
    let err = f.service.vote_by(&post, &user).unwrap_err();

    assert!(matches!(err, VotingError::DuplicateVote));
    assert_eq!(f.store.len(), 1);
    // The rejected attempt must not fire a second recalculation.
    assert_eq!(f.posts.count(post.id.unwrap()), 1);
}

#[test]
fn unpersisted_instance_fails_before_any_write() {
    let f = setup();
    let user = TestEntity::unpersisted("User");
    let post = TestEntity::persisted("Post");

    let err = f.service.vote_by(&post, &user).unwrap_err();
    assert!(matches!(err, VotingError::MissingIdentifier(tag) if tag == TypeTag::new("User")));
    assert!(f.store.is_empty());
}

#[test]
fn unregistered_kind_fails_vote_by() {
    let f = setup();
    let stranger = TestEntity::persisted("Stranger");
    let post = TestEntity::persisted("Post");

    let err = f.service.vote_by(&post, &stranger).unwrap_err();
    assert!(matches!(err, VotingError::UnregisteredType(tag) if tag == TypeTag::new("Stranger")));
    assert!(f.store.is_empty());
}

#[test]
fn votes_by_spans_votable_kinds_and_ignores_other_voters() {
    let f = setup();
    let user = TestEntity::persisted("User");
    let other = TestEntity::persisted("User");
    let post = TestEntity::persisted("Post");
    let comment = TestEntity::persisted("Comment");

    f.service.vote_by(&post, &user).unwrap();
    f.service.vote_by(&comment, &user).unwrap();
    f.service.vote_by(&post, &other).unwrap();

    let votes = f.service.votes_by(&user).unwrap();
    assert_eq!(votes.len(), 2);
    assert!(votes.iter().all(|v| v.voter == user.subject()));
    assert_eq!(votes[0].votable, post.subject());
    assert_eq!(votes[1].votable, comment.subject());
}

#[test]
fn cache_counts_follow_votes_and_unvotes() {
    let f = setup();
    let user = TestEntity::persisted("User");
    let other = TestEntity::persisted("User");
    let post = TestEntity::persisted("Post");
    let post_id = post.id.unwrap();

    f.service.vote_by(&post, &user).unwrap();
    f.service.vote_by(&post, &other).unwrap();
    assert_eq!(f.posts.count(post_id), 2);

    f.service.unvote_by(&post, &user).unwrap();
    assert_eq!(f.posts.count(post_id), 1);
    assert_eq!(
        f.posts.calls(),
        vec![(post_id, true), (post_id, true), (post_id, false)]
    );
}

#[test]
fn recalculation_failure_surfaces_but_the_vote_stands() {
    let f = setup();
    let user = TestEntity::persisted("User");
    let broken = TestEntity::persisted("Broken");

    let err = f.service.vote_by(&broken, &user).unwrap_err();
    assert!(matches!(err, VotingError::CacheRecalculation(_)));

    // Known consistency gap: the record was written and is not rolled back.
    assert_eq!(f.store.len(), 1);
    assert!(f.service.voted_for(&user, &broken).unwrap());
}

#[test]
fn cleanup_votes_decrements_each_distinct_votable_once() {
    let f = setup();
    let user = TestEntity::persisted("User");
    let post_a = TestEntity::persisted("Post");
    let post_b = TestEntity::persisted("Post");
    let comment = TestEntity::persisted("Comment");

    f.service.vote_by(&post_a, &user).unwrap();
    f.service.vote_by(&post_b, &user).unwrap();
    f.service.vote_by(&comment, &user).unwrap();

    let before_posts = f.posts.calls().len();
    let before_comments = f.comments.calls().len();

    let outcome = f
        .cleanup
        .cleanup_votes(DeletionOutcome::deleted(user.subject()))
        .unwrap();
    assert!(outcome.is_deleted());

    // All of the voter's records are gone.
    assert!(f.service.votes_by(&user).unwrap().is_empty());
    assert!(f.store.is_empty());

    // Exactly one decrement per distinct votable, two Post ids + one Comment.
    let post_decrements: Vec<_> = f.posts.calls()[before_posts..]
        .iter()
        .filter(|(_, inc)| !inc)
        .cloned()
        .collect();
    assert_eq!(
        post_decrements,
        vec![(post_a.id.unwrap(), false), (post_b.id.unwrap(), false)]
    );
    assert_eq!(f.comments.calls().len() - before_comments, 1);
}

#[test]
fn cleanup_votes_failed_outcome_passes_through_untouched() {
    let f = setup();
    let user = TestEntity::persisted("User");
    let post = TestEntity::persisted("Post");

    f.service.vote_by(&post, &user).unwrap();
    let calls_before = f.posts.calls().len();

    let failed = DeletionOutcome::failed("constraint violation");
    let outcome = f.cleanup.cleanup_votes(failed.clone()).unwrap();

    assert_eq!(outcome, failed);
    assert_eq!(f.store.len(), 1);
    assert_eq!(f.posts.calls().len(), calls_before);
}

#[test]
fn cleanup_votable_deletes_references_without_recalculation() {
    let f = setup();
    let user = TestEntity::persisted("User");
    let other = TestEntity::persisted("User");
    let post = TestEntity::persisted("Post");
    let comment = TestEntity::persisted("Comment");

    f.service.vote_by(&post, &user).unwrap();
    f.service.vote_by(&post, &other).unwrap();
    f.service.vote_by(&comment, &user).unwrap();

    let calls_before = f.posts.calls().len();

    let outcome = f
        .cleanup
        .cleanup_votable(DeletionOutcome::deleted(post.subject()))
        .unwrap();
    assert!(outcome.is_deleted());

    // Only votes referencing the deleted votable are gone, and no
    // recalculation was made for an entity that no longer exists.
    assert_eq!(f.store.len(), 1);
    assert_eq!(f.service.votes_by(&user).unwrap().len(), 1);
    assert_eq!(f.posts.calls().len(), calls_before);
}

#[test]
fn worked_example_user_votes_on_post() {
    let f = setup();
    let user = TestEntity::persisted("User");
    let post = TestEntity::persisted("Post");

    let vote = f.service.vote_by(&post, &user).unwrap();
    assert_eq!(vote.voter.type_tag, TypeTag::new("User"));
    assert_eq!(vote.voter.id, user.id.unwrap());
    assert_eq!(vote.votable.type_tag, TypeTag::new("Post"));
    assert_eq!(vote.votable.id, post.id.unwrap());

    let received = f.service.votes_for(&post).unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].id, vote.id);

    f.service.unvote_by(&post, &user).unwrap();
    assert!(f.service.votes_for(&post).unwrap().is_empty());

    let err = f.service.unvote_by(&post, &user).unwrap_err();
    assert!(matches!(err, VotingError::VoteNotFound));
}
