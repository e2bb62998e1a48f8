//! Circular play queue
//!
//! An ordered list of tracks plus a position. Navigation wraps around in both
//! directions: past the last track comes the first, before the first the last.

use tune_core::{Track, TrackId};

/// Play queue
///
/// Invariant: when the list is non-empty `index < tracks.len()`; when it is
/// empty `index == 0` and there is no current entry.
#[derive(Debug, Clone, Default)]
pub struct Queue {
    tracks: Vec<Track>,
    index: usize,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole queue
    ///
    /// The position becomes the first entry matching `start`, or 0 when
    /// `start` is not in `tracks`.
    pub fn replace(&mut self, tracks: Vec<Track>, start: TrackId) -> usize {
        self.index = tracks.iter().position(|t| t.id == start).unwrap_or(0);
        self.tracks = tracks;
        self.index
    }

    /// Move forward one entry, wrapping to the start
    pub fn advance(&mut self) -> Option<&Track> {
        if self.tracks.is_empty() {
            return None;
        }
        self.index = (self.index + 1) % self.tracks.len();
        self.tracks.get(self.index)
    }

    /// Move back one entry, wrapping to the end
    pub fn retreat(&mut self) -> Option<&Track> {
        if self.tracks.is_empty() {
            return None;
        }
        self.index = if self.index == 0 {
            self.tracks.len() - 1
        } else {
            self.index - 1
        };
        self.tracks.get(self.index)
    }

    /// Entry at the current position
    pub fn current(&self) -> Option<&Track> {
        self.tracks.get(self.index)
    }

    /// Current position
    pub fn index(&self) -> usize {
        self.index
    }

    /// All tracks in order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Bump the cached play count of every entry for `id`
    pub fn record_play(&mut self, id: TrackId) {
        self.tracks
            .iter_mut()
            .filter(|t| t.id == id)
            .for_each(Track::record_local_play);
    }

    /// Empty the queue
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.index = 0;
    }
}
