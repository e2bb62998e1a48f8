//! Player facade
//!
//! The single surface presentation talks to. Wires the engine, the queue
//! controller and the like state machine together and turns their outcomes
//! into [`PlayerNotice`]s.

use crate::backend::{MediaBackend, MediaEvent};
use crate::controller::{GatewayPlayReporter, PlayReporter, QueueController};
use crate::engine::PlaybackEngine;
use crate::events::{EngineEvent, PlayerNotice};
use crate::likes::{LikeAction, LikeRequest, LikeSettlement, LikeStateMachine};
use crate::types::{PlayerConfig, TransportStatus};
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use tracing::{debug, info};
use tune_core::{Identity, MusicGateway, PlaylistEntry, PlaylistId, Track, TrackId, TuneError};

/// Music player
///
/// Everything runs on the caller's thread. Media backend notifications enter
/// through [`handle_media_event`](Self::handle_media_event); gateway calls are
/// awaited by the caller, except play-count reports which are spawned.
///
/// # Example
///
/// ```rust,ignore
/// let mut player = MusicPlayer::new(backend, gateway, PlayerConfig::default());
/// player.play_track(track_b, Some(vec![track_a, track_b.clone(), track_c]));
/// player.toggle_like().await;
/// for notice in player.drain_notices() {
///     println!("{}: {}", notice.title(), notice.description());
/// }
/// ```
pub struct MusicPlayer<B: MediaBackend> {
    engine: PlaybackEngine<B>,
    controller: QueueController,
    likes: LikeStateMachine,
    gateway: Arc<dyn MusicGateway>,
    notices: Vec<PlayerNotice>,
    config: PlayerConfig,
}

impl<B: MediaBackend> MusicPlayer<B> {
    /// Create a player reporting plays through `gateway`
    pub fn new(backend: B, gateway: Arc<dyn MusicGateway>, config: PlayerConfig) -> Self {
        let reporter = GatewayPlayReporter::new(Arc::clone(&gateway));
        Self::with_reporter(backend, gateway, config, Box::new(reporter))
    }

    /// Create a player with a custom play-count sink
    pub fn with_reporter(
        backend: B,
        gateway: Arc<dyn MusicGateway>,
        config: PlayerConfig,
        reporter: Box<dyn PlayReporter>,
    ) -> Self {
        let mut engine = PlaybackEngine::new(backend, config.volume);
        let controller = QueueController::new(&mut engine, reporter);

        Self {
            engine,
            controller,
            likes: LikeStateMachine::new(),
            gateway,
            notices: Vec::new(),
            config,
        }
    }

    // ===== Transport =====

    /// Play `track`, replacing the queue when one is given
    pub fn play_track(&mut self, track: Track, queue: Option<Vec<Track>>) {
        self.controller.play_track(&mut self.engine, track, queue);
        self.pump();
    }

    /// Pause if playing, otherwise play. No-op without a current track.
    pub fn toggle_transport(&mut self) {
        if self.controller.current_track().is_none() {
            return;
        }

        if self.engine.status() == TransportStatus::Playing {
            self.engine.pause();
        } else {
            self.engine.play();
        }
        self.pump();
    }

    pub fn next(&mut self) {
        self.controller.next(&mut self.engine);
        self.pump();
    }

    pub fn previous(&mut self) {
        self.controller.previous(&mut self.engine);
        self.pump();
    }

    pub fn seek(&mut self, seconds: f64) {
        self.engine.seek(seconds);
        self.pump();
    }

    /// Set volume (0-100, clamped)
    pub fn set_volume(&mut self, level: i32) {
        self.engine.set_volume(level);
        self.pump();
    }

    pub fn mute(&mut self) {
        self.engine.mute();
        self.pump();
    }

    pub fn unmute(&mut self) {
        self.engine.unmute();
        self.pump();
    }

    pub fn toggle_mute(&mut self) {
        self.engine.toggle_mute();
        self.pump();
    }

    /// Drop the queue and the current track
    pub fn clear_queue(&mut self) {
        self.controller.clear(&mut self.engine);
        self.pump();
    }

    /// Feed a media backend notification
    ///
    /// # Returns
    /// `true` if it belonged to the current binding
    pub fn handle_media_event(&mut self, event: MediaEvent) -> bool {
        let applied = self.engine.handle_media_event(event);
        self.pump();
        applied
    }

    /// Observe engine events (progress, status, volume)
    pub fn subscribe(&mut self) -> Receiver<EngineEvent> {
        self.engine.subscribe()
    }

    fn pump(&mut self) {
        for event in self.controller.process_events(&mut self.engine) {
            if let EngineEvent::PlaybackFailed { token, reason } = event {
                self.notices.push(PlayerNotice::PlaybackFailed {
                    track_id: token.track_id,
                    reason,
                });
            }
        }
    }

    // ===== Likes =====

    /// Like the current track if unliked, unlike it if liked
    ///
    /// No-op without a current track. Raises a notice for the outcome.
    pub async fn toggle_like(&mut self) {
        let Some(request) = self.begin_toggle_like() else {
            return;
        };
        let outcome = request.send(self.gateway.as_ref()).await;
        self.settle_like(&request, outcome);
    }

    /// First half of [`toggle_like`](Self::toggle_like), for callers that
    /// keep several requests in flight
    pub fn begin_toggle_like(&mut self) -> Option<LikeRequest> {
        let track_id = self.controller.current_track()?.id;

        let request = self.likes.begin(track_id);
        if request.is_none() {
            self.notices.push(PlayerNotice::SignInRequired);
        }
        request
    }

    /// Second half of [`toggle_like`](Self::toggle_like)
    pub fn settle_like(
        &mut self,
        request: &LikeRequest,
        outcome: tune_core::Result<()>,
    ) -> LikeSettlement {
        let settlement = self.likes.settle(request, outcome);

        let notice = match &settlement {
            LikeSettlement::Applied { track_id, liked: true } => {
                Some(PlayerNotice::Liked { track_id: *track_id })
            }
            LikeSettlement::Applied { track_id, liked: false } => {
                Some(PlayerNotice::Unliked { track_id: *track_id })
            }
            LikeSettlement::Conflict { track_id } => {
                Some(PlayerNotice::AlreadyLiked { track_id: *track_id })
            }
            LikeSettlement::Failed {
                error: TuneError::AuthRequired,
                ..
            } => Some(PlayerNotice::SignInRequired),
            LikeSettlement::Failed {
                track_id,
                action: LikeAction::Like,
                error,
            } => Some(PlayerNotice::LikeFailed {
                track_id: *track_id,
                reason: error.to_string(),
            }),
            LikeSettlement::Failed {
                track_id,
                action: LikeAction::Unlike,
                error,
            } => Some(PlayerNotice::UnlikeFailed {
                track_id: *track_id,
                reason: error.to_string(),
            }),
            LikeSettlement::Stale { .. } => None,
        };
        self.notices.extend(notice);

        settlement
    }

    /// Switch the acting identity; a different one clears the liked set
    pub fn set_identity(&mut self, identity: Identity) {
        if self.likes.set_identity(identity) {
            info!(authenticated = self.likes.identity().is_authenticated(), "Identity changed");
        }
    }

    /// Seed the liked set
    pub fn hydrate_likes(&mut self, ids: impl IntoIterator<Item = TrackId>) {
        self.likes.hydrate(ids);
    }

    /// Reload the liked set from the gateway
    ///
    /// # Returns
    /// Number of liked tracks
    ///
    /// # Errors
    /// `AuthRequired` for an anonymous identity, or the gateway failure
    pub async fn refresh_likes(&mut self) -> tune_core::Result<usize> {
        let user_id = self
            .likes
            .identity()
            .user_id()
            .cloned()
            .ok_or(TuneError::AuthRequired)?;

        let ids = self.gateway.fetch_user_likes(&user_id).await?;
        self.likes.hydrate(ids);
        debug!(count = self.likes.len(), "Likes refreshed");
        Ok(self.likes.len())
    }

    // ===== Gateway helpers =====

    /// Play a playlist in position order
    ///
    /// Starts at `start_at` when it is in the playlist, at the first entry
    /// otherwise.
    ///
    /// # Returns
    /// `false` if the playlist has no playable tracks
    pub async fn play_playlist(
        &mut self,
        playlist_id: PlaylistId,
        start_at: Option<TrackId>,
    ) -> tune_core::Result<bool> {
        let entries = self.gateway.fetch_playlist_entries(playlist_id).await?;
        let tracks = PlaylistEntry::into_tracks(entries);

        let start = start_at
            .and_then(|id| tracks.iter().find(|t| t.id == id))
            .or_else(|| tracks.first())
            .cloned();
        let Some(start) = start else {
            info!(playlist_id = %playlist_id, "Playlist has no playable tracks");
            return Ok(false);
        };

        self.play_track(start, Some(tracks));
        Ok(true)
    }

    /// Suggested tracks, personalised for an authenticated identity
    pub async fn suggested(&self) -> tune_core::Result<Vec<Track>> {
        self.gateway
            .fetch_suggested(self.likes.identity().user_id(), self.config.suggested_limit)
            .await
    }

    /// Most played tracks
    pub async fn top(&self) -> tune_core::Result<Vec<Track>> {
        self.gateway.fetch_top(self.config.top_limit).await
    }

    // ===== Notices =====

    /// Take every notice raised since the last call, oldest first
    pub fn drain_notices(&mut self) -> Vec<PlayerNotice> {
        std::mem::take(&mut self.notices)
    }

    // ===== State Queries =====

    pub fn current_track(&self) -> Option<&Track> {
        self.controller.current_track()
    }

    pub fn status(&self) -> TransportStatus {
        self.engine.status()
    }

    /// Elapsed seconds in the current track
    pub fn elapsed(&self) -> f64 {
        self.engine.elapsed()
    }

    /// Duration in seconds (0 until metadata loads)
    pub fn duration(&self) -> f64 {
        self.engine.duration()
    }

    pub fn volume(&self) -> u8 {
        self.engine.volume()
    }

    pub fn is_muted(&self) -> bool {
        self.engine.is_muted()
    }

    pub fn queue(&self) -> &[Track] {
        self.controller.queue()
    }

    pub fn current_index(&self) -> usize {
        self.controller.current_index()
    }

    /// Whether the current track is liked
    pub fn is_liked(&self) -> bool {
        self.current_track()
            .is_some_and(|t| self.likes.is_liked(t.id))
    }

    pub fn is_track_liked(&self, track_id: TrackId) -> bool {
        self.likes.is_liked(track_id)
    }

    pub fn identity(&self) -> &Identity {
        self.likes.identity()
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Borrow the media backend
    pub fn backend(&self) -> &B {
        self.engine.backend()
    }
}
