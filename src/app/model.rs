//! Application model: the player state and the transport operations on it.

use crate::audio::{MediaEvent, MediaNotification, SourceId};
use crate::catalog::{CatalogResult, LOAD_ERROR_MESSAGE, Track};

/// The main application model.
pub struct App {
    pub tracks: Vec<Track>,
    /// Index of the current track. Always in range once `tracks` is non-empty.
    pub current: usize,
    /// Mirrors the playback element; corrected by its play/pause events.
    pub playing: bool,
    pub current_time: f64,
    /// Seconds; 0 until the element reports metadata.
    pub duration: f64,
    pub hovered: Option<usize>,
    /// First track shown in the list window. Follows keyboard cursor moves
    /// and changes of `current`; pointer hover leaves it alone.
    pub scroll: usize,
    /// Rows the list window showed on the last draw; 0 before the first.
    pub list_height: usize,
    pub loading: bool,
    pub error: Option<String>,
    /// Source currently bound to the playback element.
    pub source: Option<SourceId>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create an `App` that is waiting for the playlist to load.
    pub fn new() -> Self {
        Self {
            tracks: Vec::new(),
            current: 0,
            playing: false,
            current_time: 0.0,
            duration: 0.0,
            hovered: None,
            scroll: 0,
            list_height: 0,
            loading: true,
            error: None,
            source: None,
        }
    }

    /// Apply the one and only playlist load result.
    pub fn apply_catalog(&mut self, result: CatalogResult) {
        match result {
            Ok(tracks) => {
                self.tracks = tracks;
                self.current = 0;
                self.hovered = None;
                self.scroll = 0;
                self.error = None;
            }
            Err(e) => {
                tracing::error!(error = %e, "error fetching songs");
                self.tracks = Vec::new();
                self.error = Some(LOAD_ERROR_MESSAGE.to_string());
            }
        }
        self.loading = false;
    }

    /// Record that the loader went away without reporting anything.
    pub fn catalog_lost(&mut self) {
        tracing::error!("song loader exited without a result");
        self.tracks = Vec::new();
        self.error = Some(LOAD_ERROR_MESSAGE.to_string());
        self.loading = false;
    }

    pub fn has_tracks(&self) -> bool {
        !self.tracks.is_empty()
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.tracks.get(self.current)
    }

    /// Flip the play flag. Returns `true` when playback should start and
    /// `false` when it should pause.
    pub fn toggle_play(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }

    /// Move to the next track, wrapping to the first. Always pauses.
    pub fn next(&mut self) {
        if self.tracks.is_empty() {
            return;
        }
        self.current = (self.current + 1) % self.tracks.len();
        self.playing = false;
        self.keep_in_view(self.current);
    }

    /// Move to the previous track, wrapping to the last. Always pauses.
    pub fn prev(&mut self) {
        if self.tracks.is_empty() {
            return;
        }
        let len = self.tracks.len();
        self.current = (self.current + len - 1) % len;
        self.playing = false;
        self.keep_in_view(self.current);
    }

    /// Make `index` the current track. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index >= self.tracks.len() {
            return;
        }
        self.current = index;
        self.playing = false;
        self.keep_in_view(self.current);
    }

    /// The current track played to its end: pause, then advance.
    pub fn on_ended(&mut self) {
        self.playing = false;
        self.next();
    }

    /// Note a newly bound source. Position and duration are unknown again.
    pub fn set_source(&mut self, source: SourceId) {
        self.source = Some(source);
        self.current_time = 0.0;
        self.duration = 0.0;
    }

    /// Mirror one playback element notification into the model.
    ///
    /// Notifications from a source that is no longer bound are dropped.
    pub fn on_media(&mut self, notification: &MediaNotification) {
        if self.source != Some(notification.source) {
            tracing::trace!(source = notification.source, "stale media notification");
            return;
        }

        match &notification.event {
            MediaEvent::Play => self.playing = true,
            MediaEvent::Pause => self.playing = false,
            MediaEvent::TimeUpdate(t) => self.current_time = *t,
            MediaEvent::LoadedMetadata(d) => self.duration = *d,
            MediaEvent::Ended => self.on_ended(),
            MediaEvent::PlayRejected(reason) => {
                tracing::warn!(reason = %reason, "error playing audio");
                self.playing = false;
            }
        }
    }

    /// Fraction of the current track that has played, in `[0, 1]`.
    pub fn progress_ratio(&self) -> f64 {
        if !self.duration.is_finite() || self.duration <= 0.0 || !self.current_time.is_finite() {
            return 0.0;
        }
        (self.current_time / self.duration).clamp(0.0, 1.0)
    }

    /// Record how many rows the list window holds. A changed height brings
    /// the cursor (or the current track) back into view.
    pub fn set_list_height(&mut self, height: usize) {
        if height == self.list_height {
            return;
        }
        self.list_height = height;
        self.keep_in_view(self.hovered.unwrap_or(self.current));
    }

    /// Scroll the list window by the least amount that shows `index`.
    fn keep_in_view(&mut self, index: usize) {
        let height = self.list_height;
        if height == 0 {
            return;
        }
        if index < self.scroll {
            self.scroll = index;
        } else if index >= self.scroll + height {
            self.scroll = index + 1 - height;
        }
        self.scroll = self.scroll.min(self.tracks.len().saturating_sub(height));
    }

    /// Pointer hover. Never scrolls, so the row stays under the pointer.
    pub fn hover(&mut self, index: Option<usize>) {
        self.hovered = index.filter(|&i| i < self.tracks.len());
    }

    /// Move the hover cursor down, wrapping. The first move lands on the
    /// current track.
    pub fn hover_next(&mut self) {
        if self.tracks.is_empty() {
            return;
        }
        let index = match self.hovered {
            Some(i) => (i + 1) % self.tracks.len(),
            None => self.current,
        };
        self.hovered = Some(index);
        self.keep_in_view(index);
    }

    /// Move the hover cursor up, wrapping. The first move lands on the
    /// current track.
    pub fn hover_prev(&mut self) {
        if self.tracks.is_empty() {
            return;
        }
        let len = self.tracks.len();
        let index = match self.hovered {
            Some(i) => (i + len - 1) % len,
            None => self.current,
        };
        self.hovered = Some(index);
        self.keep_in_view(index);
    }

    /// Select the hovered row, if any.
    pub fn select_hovered(&mut self) {
        if let Some(index) = self.hovered {
            self.select(index);
        }
    }
}
