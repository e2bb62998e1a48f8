//! Like/unlike state machine
//!
//! Holds the set of liked tracks for the active identity. The set only changes
//! when a gateway call succeeds; every request carries a sequence number so a
//! response that settles after a later one for the same track is discarded.

use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::{debug, info, warn};
use tune_core::{Identity, MusicGateway, TrackId, TuneError};

/// Gateway call a toggle issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeAction {
    Like,
    Unlike,
}

impl LikeAction {
    fn opposite(liked: bool) -> Self {
        if liked {
            Self::Unlike
        } else {
            Self::Like
        }
    }

    /// Membership the action produces on success
    pub fn liked(self) -> bool {
        self == Self::Like
    }
}

impl fmt::Display for LikeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Like => write!(f, "like"),
            Self::Unlike => write!(f, "unlike"),
        }
    }
}

/// One in-flight like or unlike call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeRequest {
    pub track_id: TrackId,
    pub action: LikeAction,
    sequence: u64,
    epoch: u64,
}

impl LikeRequest {
    /// Ordering key; later requests have larger sequences
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Issue the call
    pub async fn send(&self, gateway: &dyn MusicGateway) -> tune_core::Result<()> {
        debug!(track_id = %self.track_id, action = %self.action, sequence = self.sequence, "Sending like request");
        match self.action {
            LikeAction::Like => gateway.like(self.track_id).await.map(|_| ()),
            LikeAction::Unlike => gateway.unlike(self.track_id).await,
        }
    }
}

/// What settling a response did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LikeSettlement {
    /// Call succeeded; membership now equals `liked`
    Applied { track_id: TrackId, liked: bool },

    /// Server already had the like; set unchanged
    Conflict { track_id: TrackId },

    /// Call failed; set unchanged
    Failed {
        track_id: TrackId,
        action: LikeAction,
        error: TuneError,
    },

    /// Response overtaken by a later one, or issued under another identity
    Stale { track_id: TrackId },
}

/// Like/unlike state machine
///
/// Sequences are global and monotonic but compared per track: a success is
/// applied only if no later success for the same track has settled. Failures
/// never move the watermark, so an earlier success that settles after a later
/// failure still lands.
#[derive(Debug, Default)]
pub struct LikeStateMachine {
    identity: Identity,
    liked: HashSet<TrackId>,
    /// Latest unsettled request per track
    pending: HashMap<TrackId, (u64, LikeAction)>,
    /// Highest successfully settled sequence per track
    settled: HashMap<TrackId, u64>,
    next_sequence: u64,
    /// Bumped on identity change; requests from older epochs are stale
    epoch: u64,
}

impl LikeStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a toggle for `track_id`
    ///
    /// The action is the opposite of the latest intent: the newest pending
    /// request for the track if there is one, membership otherwise.
    ///
    /// # Returns
    /// `None` for an anonymous identity
    pub fn begin(&mut self, track_id: TrackId) -> Option<LikeRequest> {
        if !self.identity.is_authenticated() {
            debug!(track_id = %track_id, "Like toggle without identity");
            return None;
        }

        let intended = self
            .pending
            .get(&track_id)
            .map_or_else(|| self.liked.contains(&track_id), |(_, action)| action.liked());
        let action = LikeAction::opposite(intended);

        self.next_sequence += 1;
        let sequence = self.next_sequence;
        self.pending.insert(track_id, (sequence, action));

        Some(LikeRequest {
            track_id,
            action,
            sequence,
            epoch: self.epoch,
        })
    }

    /// Reconcile a response with the set
    pub fn settle(
        &mut self,
        request: &LikeRequest,
        outcome: tune_core::Result<()>,
    ) -> LikeSettlement {
        let track_id = request.track_id;

        if request.epoch != self.epoch {
            debug!(track_id = %track_id, "Discarding like response from a previous identity");
            return LikeSettlement::Stale { track_id };
        }

        if self
            .pending
            .get(&track_id)
            .is_some_and(|(sequence, _)| *sequence == request.sequence)
        {
            self.pending.remove(&track_id);
        }

        let watermark = self.settled.get(&track_id).copied().unwrap_or(0);
        if request.sequence <= watermark {
            warn!(
                track_id = %track_id,
                sequence = request.sequence,
                settled = watermark,
                "Discarding out-of-order like response"
            );
            return LikeSettlement::Stale { track_id };
        }

        match outcome {
            Ok(()) => {
                self.settled.insert(track_id, request.sequence);
                let liked = request.action.liked();
                if liked {
                    self.liked.insert(track_id);
                } else {
                    self.liked.remove(&track_id);
                }
                info!(track_id = %track_id, liked, "Like state updated");
                LikeSettlement::Applied { track_id, liked }
            }
            Err(e) if e.is_like_conflict() => {
                debug!(track_id = %track_id, "Track already liked on server");
                LikeSettlement::Conflict { track_id }
            }
            Err(error) => {
                warn!(track_id = %track_id, action = %request.action, error = %error, "Like request failed");
                LikeSettlement::Failed {
                    track_id,
                    action: request.action,
                    error,
                }
            }
        }
    }

    /// Switch identity
    ///
    /// A different identity clears the set and invalidates every in-flight
    /// request.
    ///
    /// # Returns
    /// `true` if the identity changed
    pub fn set_identity(&mut self, identity: Identity) -> bool {
        if self.identity == identity {
            return false;
        }

        self.identity = identity;
        self.liked.clear();
        self.pending.clear();
        self.settled.clear();
        self.epoch += 1;
        true
    }

    /// Replace the set with server-known likes
    pub fn hydrate(&mut self, ids: impl IntoIterator<Item = TrackId>) {
        self.liked = ids.into_iter().collect();
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn is_liked(&self, track_id: TrackId) -> bool {
        self.liked.contains(&track_id)
    }

    /// Whether a request for the track is still in flight
    pub fn is_pending(&self, track_id: TrackId) -> bool {
        self.pending.contains_key(&track_id)
    }

    /// Number of liked tracks
    pub fn len(&self) -> usize {
        self.liked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.liked.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tune_core::UserId;

    fn signed_in() -> LikeStateMachine {
        let mut likes = LikeStateMachine::new();
        likes.set_identity(Identity::authenticated(UserId::new("user-1")));
        likes
    }

    const A: TrackId = TrackId::new(1);

    #[test]
    fn anonymous_cannot_begin() {
        let mut likes = LikeStateMachine::new();
        assert!(likes.begin(A).is_none());
        assert!(!likes.is_pending(A));
    }

    #[test]
    fn toggle_picks_opposite_of_membership() {
        let mut likes = signed_in();
        let request = likes.begin(A).unwrap();
        assert_eq!(request.action, LikeAction::Like);
        assert_eq!(likes.settle(&request, Ok(())), LikeSettlement::Applied { track_id: A, liked: true });
        assert!(likes.is_liked(A));

        let request = likes.begin(A).unwrap();
        assert_eq!(request.action, LikeAction::Unlike);
    }

    #[test]
    fn set_changes_only_on_success() {
        let mut likes = signed_in();
        let request = likes.begin(A).unwrap();
        assert!(!likes.is_liked(A));

        let settlement = likes.settle(&request, Err(TuneError::network("offline")));

        assert!(matches!(settlement, LikeSettlement::Failed { action: LikeAction::Like, .. }));
        assert!(!likes.is_liked(A));
        assert!(!likes.is_pending(A));
    }

    #[test]
    fn conflict_leaves_set_unchanged() {
        let mut likes = signed_in();
        let request = likes.begin(A).unwrap();

        let settlement = likes.settle(&request, Err(TuneError::LikeConflict(A)));

        assert_eq!(settlement, LikeSettlement::Conflict { track_id: A });
        assert!(!likes.is_liked(A));
    }

    #[test]
    fn overlapping_toggles_alternate_intent() {
        let mut likes = signed_in();
        let first = likes.begin(A).unwrap();
        let second = likes.begin(A).unwrap();

        assert_eq!(first.action, LikeAction::Like);
        assert_eq!(second.action, LikeAction::Unlike);
        assert!(second.sequence() > first.sequence());
    }

    #[test]
    fn stale_success_does_not_overwrite_later_one() {
        let mut likes = signed_in();
        let like = likes.begin(A).unwrap();
        let unlike = likes.begin(A).unwrap();

        assert_eq!(
            likes.settle(&unlike, Ok(())),
            LikeSettlement::Applied { track_id: A, liked: false }
        );
        assert_eq!(likes.settle(&like, Ok(())), LikeSettlement::Stale { track_id: A });
        assert!(!likes.is_liked(A));
    }

    #[test]
    fn earlier_success_lands_after_later_failure() {
        let mut likes = signed_in();
        let like = likes.begin(A).unwrap();
        let unlike = likes.begin(A).unwrap();

        likes.settle(&unlike, Err(TuneError::network("timeout")));
        let settlement = likes.settle(&like, Ok(()));

        assert_eq!(settlement, LikeSettlement::Applied { track_id: A, liked: true });
        assert!(likes.is_liked(A));
    }

    #[test]
    fn sequences_are_per_track() {
        let mut likes = signed_in();
        let b = TrackId::new(2);
        let like_a = likes.begin(A).unwrap();
        let like_b = likes.begin(b).unwrap();

        likes.settle(&like_b, Ok(()));
        likes.settle(&like_a, Ok(()));

        assert!(likes.is_liked(A));
        assert!(likes.is_liked(b));
        assert_eq!(likes.len(), 2);
    }

    #[test]
    fn identity_change_clears_and_invalidates() {
        let mut likes = signed_in();
        likes.hydrate([A, TrackId::new(2)]);
        let request = likes.begin(TrackId::new(3)).unwrap();

        assert!(likes.set_identity(Identity::authenticated(UserId::new("user-2"))));
        assert!(likes.is_empty());

        let settlement = likes.settle(&request, Ok(()));
        assert_eq!(settlement, LikeSettlement::Stale { track_id: TrackId::new(3) });
        assert!(!likes.is_liked(TrackId::new(3)));
    }

    #[test]
    fn same_identity_keeps_set() {
        let mut likes = signed_in();
        likes.hydrate([A]);
        assert!(!likes.set_identity(Identity::authenticated(UserId::new("user-1"))));
        assert!(likes.is_liked(A));
    }
}
