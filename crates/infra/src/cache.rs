//! Synchronous cached-aggregate maintenance.

use std::sync::Arc;

use tracing::debug;

use plaudit_core::VoteResult;
use plaudit_votes::{TypeRegistry, VoteSubject};

/// Pushes a votable's cache-recalculation hook after a vote state change.
///
/// Recalculation is synchronous and push-based: it runs inside the same
/// logical operation as the triggering write, so the cached field stays
/// visible-consistent with it. The cost is hook work on every vote/unvote
/// call.
#[derive(Debug, Clone)]
pub struct CacheUpdater {
    registry: Arc<TypeRegistry>,
}

impl CacheUpdater {
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self { registry }
    }

    /// Recalculate the cached aggregate of one votable instance.
    ///
    /// `increment` signals the direction of the triggering change (vote
    /// created vs. removed). A hook failure surfaces to the caller; the
    /// already-written vote record is not rolled back.
    pub fn recalculate(&self, votable: &VoteSubject, increment: bool) -> VoteResult<()> {
        let handle = self.registry.lookup_votable(&votable.type_tag)?;
        debug!(votable = %votable, increment, "recalculating cached aggregate");
        handle.recalculate_cache(votable.id, increment)
    }
}
