//! Queue & track controller
//!
//! Decides *what* plays: owns the queue and the current track, drives the
//! engine by reference, and advances when the engine reports the end of the
//! bound track.

use crate::backend::MediaBackend;
use crate::engine::PlaybackEngine;
use crate::events::EngineEvent;
use crate::queue::Queue;
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tune_core::{MusicGateway, Track, TrackId};

/// Sink for play-count increments
///
/// Fire-and-forget: implementations must not block and must swallow failures.
pub trait PlayReporter: Send {
    fn report_play(&self, track_id: TrackId);
}

/// Reports plays through a [`MusicGateway`] on the ambient tokio runtime
pub struct GatewayPlayReporter {
    gateway: Arc<dyn MusicGateway>,
}

impl GatewayPlayReporter {
    pub fn new(gateway: Arc<dyn MusicGateway>) -> Self {
        Self { gateway }
    }
}

impl PlayReporter for GatewayPlayReporter {
    fn report_play(&self, track_id: TrackId) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!(track_id = %track_id, "No async runtime, play count not reported");
            return;
        };

        let gateway = Arc::clone(&self.gateway);
        runtime.spawn(async move {
            if let Err(e) = gateway.increment_play_count(track_id).await {
                warn!(track_id = %track_id, error = %e, "Failed to update play count");
            }
        });
    }
}

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// No current track
    Empty,
    /// A current track is bound (playing, paused, or stopped at its end)
    Loaded,
}

/// Queue & track controller
///
/// Subscribes to the engine once, at construction. Transitions take
/// `&mut self`, so an end-of-track advance and an explicit `next`/`previous`
/// can never interleave; end notifications are drained in order by
/// [`process_events`](Self::process_events).
pub struct QueueController {
    queue: Queue,
    current: Option<Track>,
    events: Receiver<EngineEvent>,
    reporter: Box<dyn PlayReporter>,
}

impl QueueController {
    /// Create a controller observing `engine`
    pub fn new<B: MediaBackend>(
        engine: &mut PlaybackEngine<B>,
        reporter: Box<dyn PlayReporter>,
    ) -> Self {
        Self {
            queue: Queue::new(),
            current: None,
            events: engine.subscribe(),
            reporter,
        }
    }

    /// Play `track`, optionally replacing the queue
    ///
    /// With a non-empty queue, the position becomes the index of `track` in
    /// it (0 when absent). An empty queue is replaced by `[track]`. Without
    /// one the current queue is kept, unless it is empty, in which case it
    /// becomes `[track]`.
    ///
    /// The engine loads and starts the track and a play is reported; a
    /// failed report never affects playback.
    pub fn play_track<B: MediaBackend>(
        &mut self,
        engine: &mut PlaybackEngine<B>,
        mut track: Track,
        queue: Option<Vec<Track>>,
    ) {
        match queue {
            Some(tracks) if !tracks.is_empty() => {
                let index = self.queue.replace(tracks, track.id);
                debug!(index, len = self.queue.len(), "Queue replaced");
            }
            None if !self.queue.is_empty() => {}
            _ => {
                self.queue.replace(vec![track.clone()], track.id);
            }
        }

        info!(track_id = %track.id, title = %track.title, index = self.queue.index(), "Playing track");

        engine.load(Some(&track));
        engine.play();

        self.reporter.report_play(track.id);
        self.queue.record_play(track.id);
        track.record_local_play();
        self.current = Some(track);
    }

    /// Advance circularly and play. No-op on an empty queue.
    ///
    /// # Returns
    /// `true` if a track was started
    pub fn next<B: MediaBackend>(&mut self, engine: &mut PlaybackEngine<B>) -> bool {
        let Some(track) = self.queue.advance().cloned() else {
            return false;
        };
        self.play_track(engine, track, None);
        true
    }

    /// Step back circularly and play. No-op on an empty queue.
    pub fn previous<B: MediaBackend>(&mut self, engine: &mut PlaybackEngine<B>) -> bool {
        let Some(track) = self.queue.retreat().cloned() else {
            return false;
        };
        self.play_track(engine, track, None);
        true
    }

    /// Drain pending engine events, auto-advancing on end of track
    ///
    /// An end notification only advances if it belongs to the binding that is
    /// still current; one left over from a track that was already skipped is
    /// ignored.
    ///
    /// # Returns
    /// Every drained event, in order, for forwarding
    pub fn process_events<B: MediaBackend>(
        &mut self,
        engine: &mut PlaybackEngine<B>,
    ) -> Vec<EngineEvent> {
        let mut drained = Vec::new();

        while let Ok(event) = self.events.try_recv() {
            if let EngineEvent::Ended { token } = &event {
                if engine.current_token() == Some(*token) {
                    self.next(engine);
                } else {
                    debug!(track_id = %token.track_id, "Ignoring end of a replaced track");
                }
            }
            drained.push(event);
        }

        drained
    }

    /// Drop the queue and the current track, releasing the engine's binding
    pub fn clear<B: MediaBackend>(&mut self, engine: &mut PlaybackEngine<B>) {
        engine.unload();
        self.queue.clear();
        self.current = None;
    }

    // ===== State Queries =====

    pub fn state(&self) -> ControllerState {
        if self.current.is_some() {
            ControllerState::Loaded
        } else {
            ControllerState::Empty
        }
    }

    /// Currently selected track
    pub fn current_track(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    /// Position in the queue
    pub fn current_index(&self) -> usize {
        self.queue.index()
    }

    /// Queued tracks in order
    pub fn queue(&self) -> &[Track] {
        self.queue.tracks()
    }
}
